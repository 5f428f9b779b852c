use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use linkvault_types::api::ErrorResponse;

/// Failures surfaced by wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Unknown platform, or a wallet the caller does not own.
    #[error("Not found")]
    NotFound,

    /// The platform identity is already linked to an account.
    #[error("Wallet already linked")]
    Conflict,

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl WalletError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::InternalServerError(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The cause stays in the logs.
        let message = match &self {
            Self::InternalServerError(cause) => {
                error!("Internal error: {:#}", cause);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
