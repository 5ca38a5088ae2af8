//! Solana Actions HTTP surface.

pub mod error;
pub mod headers;
pub mod manifest;
pub mod page;
pub mod tip;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::Settings;
use crate::rpc::BlockhashSource;

pub use error::ActionError;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub blockhash: Arc<dyn BlockhashSource>,
}

impl AppState {
    pub fn new(settings: Settings, blockhash: Arc<dyn BlockhashSource>) -> Self {
        Self {
            settings: Arc::new(settings),
            blockhash,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let discovery: Router<AppState> = Router::new()
        .route("/actions.json", get(manifest::actions_json))
        .layer(manifest::cors());

    Router::new()
        .route(
            tip::TIP_API_PATH,
            get(tip::get_tip).post(tip::post_tip).options(tip::options_tip),
        )
        .route(manifest::TIP_PAGE_PATH, get(page::tip_page))
        .route("/healthz", get(|| async { "ok" }))
        .merge(discovery)
        .with_state(state)
}
