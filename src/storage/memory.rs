//! In-process account storage.
//!
//! Data is lost when the process stops.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Result, Storage, StorageError};
use crate::account::Account;

#[derive(Default)]
struct Inner {
    last_id: i32,
    accounts: BTreeMap<i32, Account>,
}

/// Account storage kept in memory.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    /// Create an empty [`MemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create(&self, account: &Account) -> Result<Account> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let account = Account {
            id: inner.last_id,
            ..account.clone()
        };
        inner.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn update(&self, _account: &Account) -> Result<Account> {
        Err(StorageError::Unsupported("account update"))
    }

    async fn delete(&self, _id: i32) -> Result<Account> {
        Err(StorageError::Unsupported("account deletion"))
    }

    async fn get(&self, id: i32) -> Result<Account> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Account>> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let storage = MemoryStorage::new();

        let first = storage.create(&Account::new("Ada", "Lovelace")).await.unwrap();
        let second = storage.create(&Account::new("Alan", "Turing")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(storage.get(2).await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_get_unknown() {
        let storage = MemoryStorage::new();
        assert!(matches!(storage.get(1).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_ordered() {
        let storage = MemoryStorage::new();
        for name in ["Ada", "Alan", "Grace"] {
            storage.create(&Account::new(name, "Doe")).await.unwrap();
        }

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.first_name)
            .collect();
        assert_eq!(names, ["Ada", "Alan", "Grace"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_unsupported() {
        let storage = MemoryStorage::new();
        let account = storage.create(&Account::new("Ada", "Lovelace")).await.unwrap();

        assert!(matches!(
            storage.update(&account).await,
            Err(StorageError::Unsupported(_))
        ));
        assert!(matches!(
            storage.delete(account.id).await,
            Err(StorageError::Unsupported(_))
        ));
        // still there.
        assert!(storage.get(account.id).await.is_ok());
    }
}
