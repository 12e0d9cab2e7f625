use crate::domain::event::ValidationError;
use alloy::primitives::TxHash;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketingError {
    #[error("no wallet provider available")]
    NoWalletProvider,
    #[error("request rejected by user: {0}")]
    UserRejected(String),
    #[error("transaction reverted: {reason}")]
    TransactionReverted { tx_hash: Option<TxHash>, reason: String },
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    #[error("wallet rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("contract interface: {0}")]
    Interface(String),
    #[error("config: {0}")]
    Config(String),
    #[error("form is not accepting submissions")]
    SubmissionClosed,
}

impl TicketingError {
    /// Wallet and chain failures, as opposed to local input or setup problems.
    pub fn is_transaction_failure(&self) -> bool {
        matches!(
            self,
            Self::NoWalletProvider
                | Self::UserRejected(_)
                | Self::TransactionReverted { .. }
                | Self::NetworkUnavailable(_)
                | Self::Rpc { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not found")] NotFound,
    #[error("bad request: {0}")] BadRequest(String),
    #[error("forbidden: {0}")] Forbidden(String),
    #[error("conflict: {0}")] Conflict(String),
    #[error("bad gateway: {0}")] BadGateway(String),
    #[error("service unavailable: {0}")] Unavailable(String),
    #[error("internal error")] Internal,
}

#[derive(Serialize)]
struct ErrorBody { error_code: &'static str, message: String }

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", m.clone()),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, "USER_REJECTED", m.clone()),
            ApiError::Conflict(m) => (StatusCode::CONFLICT, "CONFLICT", m.clone()),
            ApiError::BadGateway(m) => (StatusCode::BAD_GATEWAY, "WALLET_RPC", m.clone()),
            ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", m.clone()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", self.to_string()),
        };
        let body = axum::Json(ErrorBody { error_code: code, message: msg });
        (status, body).into_response()
    }
}

impl From<TicketingError> for ApiError {
    fn from(err: TicketingError) -> Self {
        let msg = err.to_string();
        match err {
            TicketingError::Validation(_) => ApiError::BadRequest(msg),
            TicketingError::UserRejected(_) => ApiError::Forbidden(msg),
            TicketingError::TransactionReverted { .. } | TicketingError::SubmissionClosed => {
                ApiError::Conflict(msg)
            }
            TicketingError::NoWalletProvider | TicketingError::NetworkUnavailable(_) => {
                ApiError::Unavailable(msg)
            }
            TicketingError::Rpc { .. } => ApiError::BadGateway(msg),
            TicketingError::Interface(_) | TicketingError::Config(_) => {
                tracing::error!(error = %msg, "unexpected failure");
                ApiError::Internal
            }
        }
    }
}
