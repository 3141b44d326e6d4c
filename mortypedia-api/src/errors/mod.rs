//! Error types for the Mortypedia API.
//!
//! `StartupError` covers configuration and wiring failures before the
//! server accepts requests. `ApiError` is returned by handlers and renders
//! as a JSON `{ "error": ... }` body with a status derived from its kind.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use likes_repository::{LikesError, LikesRepositoryError};
use likes_shared::types::InvalidEntityType;
use serde_json::json;
use tracing::{error, warn};

use crate::clients::{MetadataError, TextGenerationError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Repository error: {0}")]
    Repository(#[from] LikesRepositoryError),
    #[error("Database schema is missing the likes table")]
    SchemaMissing,
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Likes(#[from] LikesError),
    #[error("Invalid entity type: {0:?}")]
    InvalidEntityType(String),
    #[error("Metadata lookup failed: {0}")]
    Metadata(#[from] MetadataError),
    #[error("Text generation failed: {0}")]
    TextGeneration(#[from] TextGenerationError),
    #[error("No prompt provided")]
    MissingPrompt,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<InvalidEntityType> for ApiError {
    fn from(err: InvalidEntityType) -> Self {
        Self::InvalidEntityType(err.0)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Likes(LikesError::AuthenticationRequired) => StatusCode::UNAUTHORIZED,
            ApiError::Likes(LikesError::InvalidEntityType(_)) => StatusCode::BAD_REQUEST,
            ApiError::Likes(LikesError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            ApiError::Likes(LikesError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidEntityType(_) | ApiError::MissingPrompt | ApiError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Metadata(_) => StatusCode::BAD_GATEWAY,
            ApiError::TextGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// The message shown to clients. Upstream details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Likes(LikesError::StoreUnavailable(_)) => "Store unavailable".to_string(),
            ApiError::Metadata(_) => "Entity metadata unavailable".to_string(),
            ApiError::TextGeneration(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_likes_errors_map_to_distinct_statuses() {
        let cases = [
            (LikesError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (LikesError::invalid_entity_type("planet"), StatusCode::BAD_REQUEST),
            (LikesError::ConstraintViolation("dup".into()), StatusCode::CONFLICT),
            (LikesError::store_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_upstream_details_are_hidden() {
        let err = ApiError::from(TextGenerationError::Upstream("401: bad key sk-123".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Something went wrong");

        assert_eq!(ApiError::MissingPrompt.public_message(), "No prompt provided");
    }
}
