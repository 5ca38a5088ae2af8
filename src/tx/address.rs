//! Sender address validation.

use std::str::FromStr;

use solana_sdk::{pubkey::Pubkey, system_program};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid sender address: {0}")]
    Malformed(String),

    #[error("Invalid sender address: the system program cannot send tips")]
    SystemProgram,
}

/// Parse the `account` field of a POST body into the tip sender.
///
/// The value must be a Base58 string decoding to exactly 32 bytes, with no
/// surrounding whitespace. The system
/// program id is well-formed but can never sign, so it is refused as well.
pub fn parse_sender(account: &str) -> Result<Pubkey, AddressError> {
    let sender = Pubkey::from_str(account)
        .map_err(|e| AddressError::Malformed(e.to_string()))?;

    if sender == system_program::id() {
        return Err(AddressError::SystemProgram);
    }

    Ok(sender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_base58_public_key() {
        let key = Pubkey::new_unique();
        assert_eq!(parse_sender(&key.to_string()), Ok(key));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        let key = Pubkey::new_unique();
        assert!(matches!(
            parse_sender(&format!(" {key}\n")),
            Err(AddressError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_base58() {
        // '0', 'O', 'I' and 'l' are outside the Base58 alphabet
        assert!(matches!(
            parse_sender("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"),
            Err(AddressError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let short = bs58_of(&[7u8; 16]);
        assert!(matches!(parse_sender(&short), Err(AddressError::Malformed(_))));
        assert!(matches!(parse_sender(""), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn rejects_system_program() {
        assert_eq!(
            parse_sender("11111111111111111111111111111111"),
            Err(AddressError::SystemProgram)
        );
    }

    #[test]
    fn error_messages_name_the_sender() {
        let err = parse_sender("nope").unwrap_err();
        assert!(err.to_string().starts_with("Invalid sender address"));
    }

    fn bs58_of(bytes: &[u8]) -> String {
        bs58::encode(bytes).into_string()
    }
}
