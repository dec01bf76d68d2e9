//! API error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use walletlens_chain_data::ChainDataError;
use walletlens_core::errors::{DatabaseError, Error};

pub type ApiResult<T> = Result<T, ApiError>;

/// Wraps a core error and translates it into an HTTP response.
///
/// Data errors are the caller's problem (4xx); provider and storage failures
/// are transient infrastructure errors (5xx). Nothing is retried here.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) | Error::Ledger(_) => StatusCode::BAD_REQUEST,
            Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::ChainFamilyMismatch { .. } => StatusCode::CONFLICT,
            Error::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ChainData(ChainDataError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Error::ChainData(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) | Error::Repository(_) | Error::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
