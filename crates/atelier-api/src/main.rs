//! Atelier messaging API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p atelier-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use atelier_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().inspect_err(|e| {
        eprintln!("Failed to load configuration: {e}");
    })?;

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    atelier_api::run(config).await?;

    Ok(())
}
