use tracing::{error, info};

mod app;
mod config;
mod db;
mod error;
mod state;
mod users;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "crud_users=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    if dotenv.is_err() {
        info!("no .env file found, using process environment");
    }

    let config = AppConfig::from_env()?;

    // No request is served without a live store.
    let db = match db::init(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "database bootstrap failed");
            return Err(e.into());
        }
    };

    let app = app::build_app(AppState::new(db.clone()));
    app::serve(app, &config).await?;

    db.close().await;
    info!("shutdown complete");
    Ok(())
}
