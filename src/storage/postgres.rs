//! PostgreSQL implementation for account storage.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Result, Storage, StorageError};
use crate::account::Account;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id          SERIAL PRIMARY KEY,
        first_name  VARCHAR(50) NOT NULL,
        last_name   VARCHAR(50) NOT NULL,
        number      BIGINT NOT NULL,
        balance     NUMERIC NOT NULL DEFAULT 0,
        created_at  TIMESTAMPTZ NOT NULL
    )
"#;

/// PostgreSQL account storage.
#[derive(Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Create a new [`PgStorage`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create `account` table if it does not exist yet.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("`account` table ready");
        Ok(())
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn create(&self, account: &Account) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (first_name, last_name, number, balance, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, number, balance, created_at
            "#,
        )
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.number)
        .bind(account.balance)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    async fn update(&self, _account: &Account) -> Result<Account> {
        Err(StorageError::Unsupported("account update"))
    }

    async fn delete(&self, _id: i32) -> Result<Account> {
        Err(StorageError::Unsupported("account deletion"))
    }

    async fn get(&self, id: i32) -> Result<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Account>> {
        Ok(sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at
            FROM account
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    async fn storage(pool: PgPool) -> PgStorage {
        let storage = PgStorage::new(pool);
        storage.init().await.unwrap();
        storage
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL instance behind DATABASE_URL"]
    async fn test_create_and_get(pool: PgPool) {
        let storage = storage(pool).await;

        let account = Account::new("Ada", "Lovelace");
        let created = storage.create(&account).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.first_name, account.first_name);
        assert_eq!(created.number, account.number);
        assert_eq!(created.balance, Decimal::ZERO);

        let found = storage.get(created.id).await.unwrap();
        assert_eq!(found, created);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL instance behind DATABASE_URL"]
    async fn test_get_unknown(pool: PgPool) {
        let storage = storage(pool).await;

        assert!(matches!(
            storage.get(4242).await,
            Err(StorageError::NotFound)
        ));
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL instance behind DATABASE_URL"]
    async fn test_list(pool: PgPool) {
        let storage = storage(pool).await;

        let first = storage.create(&Account::new("Ada", "Lovelace")).await.unwrap();
        let second = storage.create(&Account::new("Alan", "Turing")).await.unwrap();

        let ids: Vec<i32> = storage.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[sqlx::test]
    #[ignore = "requires a PostgreSQL instance behind DATABASE_URL"]
    async fn test_init_twice(pool: PgPool) {
        let storage = storage(pool).await;
        storage.init().await.unwrap();
    }
}
