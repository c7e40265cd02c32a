//! SeaORM storage backend
//!
//! Persists campaigns, places, banners and click events with SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod banner_store;
mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, RotatorError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(RotatorError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        "postgresql" => "postgres".to_string(),
        other => other.to_string(),
    }
}

/// SQLite 文件路径补全为 sqlx 可识别的 URL
fn sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}", database_url)
    }
}

/// SeaORM-based banner storage
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(RotatorError::database_config("database_url is not set"));
        }

        let backend_name = normalize_backend_name(backend_name);
        let db = if backend_name == "sqlite" {
            connect_sqlite(&sqlite_url(database_url)).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        info!(
            "{} banner storage initialized",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// Infers the backend from `config.database_url` and connects
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let backend = infer_backend_from_url(&config.database_url)?;
        Self::new(&config.database_url, &backend, config).await
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
