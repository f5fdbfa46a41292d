use hmps_server::{bootstrap, build_router, logger, state::AppState};

use hmps_config::EnvPresence;
use hmps_db::SqliteConnector;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env if present (development), then configuration
    let _ = dotenvy::dotenv();
    let config = hmps_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = hmps_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting hmps-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Server state starts in the Starting phase; the bootstrap task owns
    // the only transition out of it
    let state = AppState::new(config.server.environment.clone(), EnvPresence::detect());
    let app = build_router(state.clone());

    let database_path = config.database_path()?;
    info!("Database file: {}", database_path.display());

    let connector = Arc::new(SqliteConnector::new(
        database_path,
        config.database.max_connections,
        Duration::from_secs(config.database.connect_timeout_secs),
    ));

    // The single connection attempt races with request serving: the
    // phase-independent endpoints answer while it is outstanding
    tokio::spawn(bootstrap::run(
        state.clone(),
        connector,
        config.auth.clone(),
        bootstrap::production_modules(),
    ));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Shutdown complete");

    Ok(())
}
