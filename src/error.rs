//! Error handler for the HTTP API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Enum representing server-side errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{}", describe(.0))]
    Validation(#[from] ValidationErrors),

    #[error("invalid request body")]
    Body(#[from] JsonRejection),

    #[error("param \"id\" is required")]
    MissingId,

    #[error("id must be an integer")]
    InvalidId,

    #[error("not found")]
    NotFound,

    #[error("method not allowed {0}")]
    MethodNotAllowed(Method),

    #[error("{details}")]
    Internal {
        details: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ServerError {
    /// Hide `source` from the caller behind `details`.
    pub fn internal<E>(details: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal {
            details,
            source: Box::new(source),
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ServerError::NotFound,
            err => ServerError::internal("something went wrong", err),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub error: String,
}

/// Join every validation message, `first_name` issues before `last_name` ones.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .iter()
        .flat_map(|(_, issues)| issues.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Body(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                StatusCode::BAD_REQUEST
            },
            ServerError::Internal { details, source } => {
                tracing::error!(error = %source, %details, "request failed");
                StatusCode::BAD_REQUEST
            },
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ResponseError {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
