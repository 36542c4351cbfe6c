//! HTTP API.
pub mod account;
pub mod status;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::Method;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::ServerError;

/// JSON body deserialized then checked with [`Validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Valid<T>(pub T);

impl<T, S> FromRequest<S> for Valid<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Valid(value))
    }
}

/// Fallback for methods a route does not handle.
pub async fn method_not_allowed(method: Method) -> ServerError {
    ServerError::MethodNotAllowed(method)
}

/// State backed by [`crate::storage::MemoryStorage`].
#[cfg(test)]
pub fn state() -> crate::AppState {
    use std::sync::Arc;

    crate::AppState {
        config: Arc::new(crate::config::Configuration::default()),
        storage: Arc::new(crate::storage::MemoryStorage::new()),
        metrics: None,
    }
}
