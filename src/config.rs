use std::fmt;

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

// Password stays out of logs and panics.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl DbConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(PgSslMode::Disable)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub app_host: String,
    pub app_port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves every setting through `lookup`; unset or empty values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db = DbConfig {
            host: var("DB_HOST", "localhost"),
            port: var("DB_PORT", "5432")
                .parse()
                .context("DB_PORT must be a port number")?,
            database: var("DB_DATABASE", "crud_db"),
            username: var("DB_USERNAME", "postgres"),
            password: var("DB_PASSWORD", ""),
        };

        Ok(Self {
            db,
            app_host: var("APP_HOST", "0.0.0.0"),
            app_port: var("APP_PORT", "8080")
                .parse()
                .context("APP_PORT must be a port number")?,
        })
    }
}
