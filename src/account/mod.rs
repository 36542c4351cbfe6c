//! Account data model.
mod request;

pub use request::*;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account numbers are drawn from `0..NUMBER_RANGE`.
pub const NUMBER_RANGE: i64 = 10_000;

/// Account as saved on database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Assigned by the store, `0` until inserted.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Random number, not unique.
    pub number: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new, not yet persisted, [`Account`].
    ///
    /// A random `number` is drawn, `balance` is zero and `created_at` is
    /// the current UTC time.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: rand::thread_rng().gen_range(0..NUMBER_RANGE),
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let before = Utc::now();
        let account = Account::new("Ada", "Lovelace");

        assert_eq!(account.id, 0);
        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.last_name, "Lovelace");
        assert!((0..NUMBER_RANGE).contains(&account.number));
        assert_eq!(account.balance, Decimal::ZERO);
        assert!(account.created_at >= before);
        assert!(account.created_at <= Utc::now());
    }

    #[test]
    fn test_account_json_shape() {
        let account = Account::new("Ada", "Lovelace");
        let json = serde_json::to_value(&account).unwrap();

        for key in ["id", "firstName", "lastName", "number", "balance", "created_at"] {
            assert!(json.get(key).is_some(), "missing `{key}`");
        }
        assert!(json["balance"].is_number());
        assert_eq!(json["balance"], serde_json::json!(0.0));
    }
}
