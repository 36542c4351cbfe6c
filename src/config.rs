//! Configuration manager.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::FromRef;
use serde::{Deserialize, Serialize};

use crate::AppState;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_NAME: &str = "accounts";
const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_CREDENTIALS: &str = "postgres";
const DEFAULT_DATABASE_NAME: &str = "accounts";
const DEFAULT_POOL_SIZE: u32 = 10;
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name.
    pub name: String,
    /// Socket address to listen on.
    pub address: String,
    /// Where accounts are kept.
    pub storage: StorageKind,
    #[serde(skip_deserializing)]
    pub version: String,
    #[serde(skip)]
    path: PathBuf,
    /// Related to PostgreSQL configuration.
    #[serde(skip_serializing)]
    pub postgres: Option<Postgres>,
}

/// Storage backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Postgres,
    Memory,
}

/// PostgreSQL configuration.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Postgres {
    /// Hostname:(?port) for PostgreSQL instance.
    pub address: String,
    /// Database name.
    pub database: Option<String>,
    /// Username credential to connect.
    pub username: Option<String>,
    /// Password credential to connect.
    pub password: Option<String>,
    /// Maximum pool connections.
    pub pool_size: Option<u32>,
}

impl Postgres {
    /// Connection URL built from this entry.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.username.as_deref().unwrap_or(DEFAULT_CREDENTIALS),
            self.password.as_deref().unwrap_or(DEFAULT_CREDENTIALS),
            self.address,
            self.database.as_deref().unwrap_or(DEFAULT_DATABASE_NAME),
        )
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            address: DEFAULT_ADDRESS.to_owned(),
            storage: StorageKind::default(),
            version: VERSION.to_owned(),
            path: PathBuf::default(),
            postgres: Some(Postgres {
                address: "localhost:5432".to_owned(),
                ..Default::default()
            }),
        }
    }
}

impl FromRef<AppState> for Arc<Configuration> {
    fn from_ref(state: &AppState) -> Arc<Configuration> {
        Arc::clone(&state.config)
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// PostgreSQL connection URL.
    ///
    /// `DATABASE_URL` environment variable wins over `postgres` entry.
    pub fn database_url(&self) -> Option<String> {
        std::env::var("DATABASE_URL")
            .ok()
            .or_else(|| self.postgres.as_ref().map(Postgres::url))
    }

    /// Maximum PostgreSQL pool connections.
    pub fn pool_size(&self) -> u32 {
        self.postgres
            .as_ref()
            .and_then(|p| p.pool_size)
            .unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location.
    pub fn read(self) -> Arc<Self> {
        let file_path = if self.path.is_file() {
            self.path.clone()
        } else {
            Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        let mut config = match File::open(&file_path) {
            Ok(file) => match serde_yaml::from_reader::<_, Configuration>(file) {
                Ok(config) => config.path(file_path),
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        };

        // set app version.
        config.version = VERSION.to_owned();

        if let Ok(address) = std::env::var("ADDRESS") {
            config.address = address;
        }

        Arc::new(config)
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, path = ?self.path, "cannot read configuration file, using defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_url() {
        let postgres = Postgres {
            address: "db:5433".into(),
            username: Some("root".into()),
            ..Default::default()
        };

        assert_eq!(postgres.url(), "postgres://root:postgres@db:5433/accounts");
    }

    #[test]
    fn test_partial_yaml() {
        let config: Configuration = serde_yaml::from_str(
            r#"
            name: bank
            storage: memory
            postgres:
              address: localhost:5433
              pool_size: 3
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "bank");
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.pool_size(), 3);
    }

    #[test]
    fn test_missing_file() {
        let config = Configuration::default()
            .path(PathBuf::from("does/not/exist.yaml"))
            .read();

        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(config.version, VERSION);
    }
}
