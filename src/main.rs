//! Application entry point: wire up tracing, configuration, the database, and
//! the HTTP server.

use campus_ledger::errors::Result;
use campus_ledger::{api, config};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;

    // 4. Seed initial batches from config.toml, if present
    match config::batches::load_default_config() {
        Ok(batch_config) => {
            let inserted = config::batches::seed_initial_batches(&db, &batch_config).await?;
            info!(inserted, "Batch seeding complete.");
        }
        Err(e) => warn!("No batch seed configuration loaded: {}", e),
    }

    // 5. Run the HTTP server
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:4000".to_string())
        .parse()
        .map_err(|e| campus_ledger::errors::Error::Config {
            message: format!("Invalid BIND_ADDR: {e}"),
        })?;

    api::run_server(addr, db).await
}
