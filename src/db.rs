use sqlx::{postgres::PgPoolOptions, Connection, PgPool};
use tracing::{debug, info};

use crate::{config::DbConfig, error::BootstrapError};

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Opens the pool, checks the database answers and makes sure the `users`
/// table exists. The caller decides what to do when this fails.
pub async fn init(cfg: &DbConfig) -> Result<PgPool, BootstrapError> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(cfg.connect_options())
        .await
        .map_err(BootstrapError::Connect)?;

    let mut conn = db.acquire().await.map_err(BootstrapError::Ping)?;
    conn.ping().await.map_err(BootstrapError::Ping)?;
    drop(conn);

    ensure_schema(&db).await?;

    info!(
        host = %cfg.host,
        port = cfg.port,
        database = %cfg.database,
        "database connected"
    );
    Ok(db)
}

/// Idempotent: safe to run against a database that already has the table.
pub async fn ensure_schema(db: &PgPool) -> Result<(), BootstrapError> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(db)
        .await
        .map_err(BootstrapError::Schema)?;
    debug!("users table ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    // Needs a reachable Postgres configured through DB_* variables.
    #[tokio::test]
    #[ignore]
    async fn bootstrap_twice_is_idempotent() {
        let cfg = AppConfig::from_env().unwrap();
        let db = init(&cfg.db).await.expect("first bootstrap");
        ensure_schema(&db).await.expect("second schema run");
        init(&cfg.db).await.expect("second bootstrap");

        let tables: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM information_schema.tables WHERE table_name = 'users'",
        )
        .fetch_one(&db)
        .await
        .unwrap();
        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connect_error() {
        let cfg = AppConfig::from_lookup(|key| match key {
            "DB_HOST" => Some("db.invalid".into()),
            "DB_PORT" => Some("1".into()),
            _ => None,
        })
        .unwrap();
        let err = init(&cfg.db).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Connect(_)));
    }
}
