use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::actions::types::ActionErrorBody;
use crate::rpc::RpcError;
use crate::tx::AddressError;
use crate::utils::amount::AmountError;

/// Everything that can end a `POST /api/tip` without a transaction.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    InvalidSender(#[from] AddressError),

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("Could not fetch a recent blockhash: {0}")]
    Rpc(#[from] RpcError),

    #[error("Failed to serialize transaction: {0}")]
    Serialization(#[from] bincode::Error),
}

impl ActionError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_)
            | Self::InvalidQuery(_)
            | Self::InvalidSender(_)
            | Self::InvalidAmount(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Rpc(RpcError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            Self::Rpc(RpcError::Request(_)) => StatusCode::BAD_GATEWAY,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let body = ActionErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
