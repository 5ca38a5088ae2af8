//! Building the unsigned tip transaction handed back to wallets.

pub mod address;
pub mod transfer;

pub use address::{parse_sender, AddressError};
pub use transfer::{encode_transaction, TransferIntent};
