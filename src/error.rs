/*
 * Responsibility
 * - AppError shared by the hotel operations
 * - Rendered through the proxy response builder so errors carry the same CORS headers
 * - Fatal failures (validation, upstream) are logged and never echoed to the caller
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::proxy::{ErrorBody, Operation, ProxyResponse};
use crate::repos::error::RepoError;
use crate::services::auth::claims::ClaimsError;
use crate::services::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("malformed identity token: {0}")]
    MalformedToken(#[from] ClaimsError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("hotel store failure: {0}")]
    Repo(#[from] RepoError),
    #[error("image store failure: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::MalformedToken(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_)
            | AppError::Repo(_)
            | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_proxy_response(self, operation: Operation) -> ProxyResponse {
        let status = self.status();

        let message = match &self {
            AppError::BadRequest(m) | AppError::NotFound(m) | AppError::Unauthorized(m) => {
                m.clone()
            }
            AppError::MalformedToken(err) => {
                tracing::warn!(error = %err, "rejecting undecodable token");
                "Malformed identity token.".to_string()
            }
            AppError::Validation(_)
            | AppError::Repo(_)
            | AppError::Storage(_) => {
                tracing::error!(error = %self, ?operation, "request failed");
                "Internal server error".to_string()
            }
        };

        ProxyResponse::json(status, operation, &ErrorBody { error: &message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_keep_their_message() {
        let res = AppError::unauthorized("Unauthorized. Must be a member of admin group")
            .into_proxy_response(Operation::AddHotel);

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.body.as_deref(),
            Some(r#"{"Error":"Unauthorized. Must be a member of admin group"}"#)
        );
    }

    #[test]
    fn fatal_errors_hide_their_cause() {
        let res = AppError::validation("price is not an integer: abc")
            .into_proxy_response(Operation::AddHotel);

        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body.as_deref(), Some(r#"{"Error":"Internal server error"}"#));
    }

    #[test]
    fn malformed_token_is_a_bad_request() {
        let res = AppError::from(ClaimsError::Segments).into_proxy_response(Operation::ListHotels);

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body.as_deref(), Some(r#"{"Error":"Malformed identity token."}"#));
    }
}
