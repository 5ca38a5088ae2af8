//! Tip jar Actions server
//!
//! Usage: cargo run --bin tipjar -- --config config/settings.json

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use solana_tipjar::actions::{router, AppState};
use solana_tipjar::config::settings::{Settings, DEFAULT_SETTINGS_PATH};
use solana_tipjar::rpc::RpcBlockhashSource;

#[derive(Parser, Debug)]
#[command(name = "tipjar", about = "Serve the Solana Actions tip jar")]
struct Cli {
    /// Settings file; defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Listen address, overrides bind_addr and TIPJAR_BIND
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// RPC endpoint, overrides rpc_url and SOLANA_RPC_URL
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(&cli.config)?;
    if let Some(bind) = cli.bind {
        settings.bind_addr = bind;
    }
    if let Some(url) = cli.rpc_url.as_deref() {
        settings.set_rpc_url(url)?;
    }
    info!("[CONFIG] {:?}", settings);

    let source = Arc::new(RpcBlockhashSource::new(
        settings.rpc_url.clone(),
        settings.rpc_timeout,
    ));
    let addr = settings.bind_addr;
    let app = router(AppState::new(settings, source));

    info!("🚀 [SERVER] Tip jar listening on http://{}", addr);
    axum::Server::try_bind(&addr)
        .with_context(|| format!("binding {addr}"))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("[SERVER] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[SERVER] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
