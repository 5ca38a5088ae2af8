//! Check that the configured RPC endpoint hands out blockhashes
//!
//! Usage: cargo run --bin check_rpc

use std::time::Instant;

use anyhow::Result;
use solana_tipjar::config::Settings;
use solana_tipjar::rpc::{BlockhashSource, RpcBlockhashSource};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::load()?;
    let source = RpcBlockhashSource::new(settings.rpc_url.clone(), settings.rpc_timeout);

    println!("🔍 Fetching latest blockhash from {}", source.url());
    let start = Instant::now();
    let blockhash = source.latest_blockhash().await?;

    println!("✅ Blockhash: {}", blockhash);
    println!("   Round trip: {}ms", start.elapsed().as_millis());
    println!("   Recipient: {}", settings.recipient);

    Ok(())
}
