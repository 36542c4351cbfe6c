//! `/account` resource.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::account::{Account, CreateAccountRequest};
use crate::error::Result;
use crate::router::Valid;
use crate::storage::Storage;
use crate::ServerError;

/// Handler to create an account.
pub async fn create(
    State(storage): State<Arc<dyn Storage>>,
    Valid(body): Valid<CreateAccountRequest>,
) -> Result<Json<Account>> {
    let account = storage
        .create(&body.into_account())
        .await
        .map_err(|err| ServerError::internal("failed to create account", err))?;

    tracing::info!(id = account.id, "account created");

    Ok(Json(account))
}

/// Account deletion is not wired to storage yet.
pub async fn delete() {}

/// Handler to get an account by its `id`.
pub async fn get(
    State(storage): State<Arc<dyn Storage>>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Account>> {
    let Ok(Path(id)) = id else {
        return Err(ServerError::InvalidId);
    };
    let id = id.parse::<i32>().map_err(|_| ServerError::InvalidId)?;

    Ok(Json(storage.get(id).await?))
}

/// `GET /account/` without any `id`.
pub async fn missing_id() -> ServerError {
    ServerError::MissingId
}
