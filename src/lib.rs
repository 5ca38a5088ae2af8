//! Solana Actions tip jar: hands out unsigned SOL transfer transactions for
//! wallets to sign.

pub mod actions;
pub mod config;
pub mod rpc;
pub mod tx;
pub mod utils;
