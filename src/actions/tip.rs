//! `/api/tip` handlers: GET metadata, POST transaction builder, OPTIONS preflight.
//!
//! POST flow:
//! 1. Validate the sender (`account` in the body)
//! 2. Validate the amount (`amount` query parameter) and convert to lamports
//! 3. Fetch a recent blockhash (the only network call)
//! 4. Build the transfer with the sender as fee payer, serialize it unsigned
//! 5. Return it base64-encoded with a confirmation message

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::HeaderMap,
    Json,
};
use log::{error, info, warn};
use serde::Deserialize;

use crate::actions::error::ActionError;
use crate::actions::headers::action_headers;
use crate::actions::types::{
    ActionGetResponse, ActionLinks, ActionParameter, ActionPostRequest, ActionPostResponse,
    ActionType, LinkedAction, LinkedActionType,
};
use crate::actions::AppState;
use crate::config::Settings;
use crate::tx::{encode_transaction, parse_sender, TransferIntent};
use crate::utils::amount::{parse_amount, AMOUNT_PLACEHOLDER};

pub const TIP_API_PATH: &str = "/api/tip";

#[derive(Debug, Default, Deserialize)]
pub struct TipQuery {
    pub amount: Option<String>,
}

/// Action descriptor for the configured amounts.
pub fn describe(settings: &Settings) -> ActionGetResponse {
    let mut actions: Vec<LinkedAction> = settings
        .offered_amounts_sol
        .iter()
        .map(|amount| {
            let amount = amount.normalize();
            LinkedAction {
                kind: LinkedActionType::Post,
                label: format!("{amount} SOL"),
                href: format!("{TIP_API_PATH}?amount={amount}"),
                parameters: vec![],
            }
        })
        .collect();

    if settings.custom_amount {
        actions.push(LinkedAction {
            kind: LinkedActionType::Post,
            label: settings.label.clone(),
            href: format!("{TIP_API_PATH}?amount={AMOUNT_PLACEHOLDER}"),
            parameters: vec![ActionParameter {
                kind: Some("number".to_string()),
                name: "amount".to_string(),
                label: settings.custom_amount_label.clone(),
                required: true,
            }],
        });
    }

    ActionGetResponse {
        kind: ActionType::Action,
        icon: settings.icon.clone(),
        title: settings.title.clone(),
        description: settings.description.clone(),
        label: settings.label.clone(),
        links: ActionLinks { actions },
    }
}

/// Validate, fetch a blockhash, and produce the unsigned transfer.
pub async fn build_tip(
    state: &AppState,
    account: &str,
    amount: Option<&str>,
) -> Result<ActionPostResponse, ActionError> {
    let settings = &state.settings;

    let sender = parse_sender(account)?;
    let tip = parse_amount(amount, settings.amount_policy)?;
    info!(
        "[TIP] {} SOL ({} lamports) from {} to {}",
        tip,
        tip.lamports(),
        sender,
        settings.recipient
    );

    let recent_blockhash = state.blockhash.latest_blockhash().await?;

    let intent = TransferIntent {
        from: sender,
        to: settings.recipient,
        lamports: tip.lamports(),
        recent_blockhash,
    };
    let transaction = encode_transaction(&intent.to_unsigned_transaction())?;

    Ok(ActionPostResponse {
        transaction,
        message: settings.thank_you(tip),
    })
}

/// Body and query of a POST, with extractor failures folded into `ActionError`.
///
/// The body is parsed as JSON regardless of its `Content-Type`.
fn read_request(
    query: Result<Query<TipQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(ActionPostRequest, TipQuery), ActionError> {
    let body = body.map_err(|rejection| ActionError::InvalidBody(rejection.body_text()))?;
    let request: ActionPostRequest =
        serde_json::from_slice(&body).map_err(|e| ActionError::InvalidBody(e.to_string()))?;
    let Query(query) = query.map_err(|rejection| ActionError::InvalidQuery(rejection.body_text()))?;
    Ok((request, query))
}

pub async fn get_tip(State(state): State<AppState>) -> (HeaderMap, Json<ActionGetResponse>) {
    (
        action_headers(&state.settings.blockchain_id),
        Json(describe(&state.settings)),
    )
}

pub async fn post_tip(
    State(state): State<AppState>,
    query: Result<Query<TipQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> (HeaderMap, Result<Json<ActionPostResponse>, ActionError>) {
    let headers = action_headers(&state.settings.blockchain_id);

    let result = match read_request(query, body) {
        Ok((request, query)) => build_tip(&state, &request.account, query.amount.as_deref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => (headers, Ok(Json(response))),
        Err(e) => {
            if e.is_client_error() {
                warn!("[TIP] Rejected: {}", e);
            } else {
                error!("[TIP] Failed: {}", e);
            }
            (headers, Err(e))
        }
    }
}

pub async fn options_tip(State(state): State<AppState>) -> (HeaderMap, Json<serde_json::Value>) {
    (
        action_headers(&state.settings.blockchain_id),
        Json(serde_json::json!({})),
    )
}
