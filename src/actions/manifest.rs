//! `GET /actions.json`: tells action clients which API serves each page.

use axum::Json;
use http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::actions::tip::TIP_API_PATH;
use crate::actions::types::{ActionRule, ActionsJson};

pub const TIP_PAGE_PATH: &str = "/tip";

pub fn rules() -> ActionsJson {
    ActionsJson {
        rules: vec![ActionRule {
            path_pattern: TIP_PAGE_PATH.to_string(),
            api_path: TIP_API_PATH.to_string(),
        }],
    }
}

pub async fn actions_json() -> Json<ActionsJson> {
    Json(rules())
}

pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
