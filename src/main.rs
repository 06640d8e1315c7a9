// Rolodex Server entrypoint
//!
//! The heavy lifting (configuration, storage wiring, middleware setup)
//! lives in dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use log::info;
use rolodex_server::config::ServerConfig;
use rolodex_server::lifecycle::{bootstrap, run};
use rolodex_server::logging;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = std::env::var("ROLODEX_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = match ServerConfig::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    let server_log_path = format!("{}/server.log", config.logging.logs_path);
    logging::init_logging(
        &config.logging.level,
        &server_log_path,
        config.logging.log_to_console,
        Some(&config.logging.targets),
        &config.logging.format,
    )?;

    info!("Rolodex Server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Host: {}  Port: {}  Storage: {}",
        config.server.host, config.server.port, config.storage.backend
    );

    // Build application state, then serve until shutdown
    let components = bootstrap(&config).await?;
    run(&config, components).await
}
