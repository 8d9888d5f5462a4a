//! Attendance tracker server binary.

use std::net::SocketAddr;

use attendance_server::{config::Config, create_app, create_state, init_tracing};
use axum::Router;
use record_store::{MemoryRecordStore, SqliteRecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        periods_per_day = config.periods_per_day,
        persistent = config.database_url.is_some(),
        "Starting attendance server"
    );

    let app: Router = match &config.database_url {
        Some(url) => {
            let store = SqliteRecordStore::connect(url).await?;
            tracing::info!(database_url = %url, "Using SQLite record store");
            create_app(create_state(config.clone(), store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            create_app(create_state(config.clone(), MemoryRecordStore::new()))
        }
    };

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
