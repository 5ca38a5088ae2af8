//! Unsigned transfer construction and wire encoding.

use base64::Engine;
use solana_sdk::{
    hash::Hash, message::Message, pubkey::Pubkey, system_instruction, transaction::Transaction,
};

/// A single SOL transfer, fully resolved but not yet signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub from: Pubkey,
    pub to: Pubkey,
    pub lamports: u64,
    pub recent_blockhash: Hash,
}

impl TransferIntent {
    /// Legacy transaction with one system transfer; the sender is fee payer.
    ///
    /// Signature slots are present but zeroed, so the wallet can sign the
    /// message as-is.
    pub fn to_unsigned_transaction(&self) -> Transaction {
        let ix = system_instruction::transfer(&self.from, &self.to, self.lamports);
        let msg = Message::new_with_blockhash(&[ix], Some(&self.from), &self.recent_blockhash);
        Transaction::new_unsigned(msg)
    }
}

/// Wire-encode `tx` and wrap it in standard base64.
pub fn encode_transaction(tx: &Transaction) -> Result<String, bincode::Error> {
    let bytes = bincode::serialize(tx)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}
