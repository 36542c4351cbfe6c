//! Account persistence.
mod memory;
mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

use async_trait::async_trait;

use crate::account::Account;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors returned by a [`Storage`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("{0} is not yet supported")]
    Unsupported(&'static str),

    #[error("SQL request failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Port for account persistence operations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a new account and return it with its store-assigned `id`.
    async fn create(&self, account: &Account) -> Result<Account>;

    /// Update an existing account. Not yet supported.
    async fn update(&self, account: &Account) -> Result<Account>;

    /// Delete an account. Not yet supported.
    async fn delete(&self, id: i32) -> Result<Account>;

    /// Find an account by `id`.
    async fn get(&self, id: i32) -> Result<Account>;

    /// Every account, ordered by `id`.
    async fn list(&self) -> Result<Vec<Account>>;
}
