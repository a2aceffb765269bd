//! Server setup and initialization
//!
//! Wires the pool, repository and services together, schedules the
//! retention sweeper and runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use atelier_common::{AppConfig, AppError, JwtService, SweeperConfig};
use atelier_db::{create_pool, migrations_dir, run_migrations, PgMessageRepository};
use atelier_service::{RetentionSweeper, ServiceContext};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = atelier_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, migrations_dir())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

    let message_repo = Arc::new(PgMessageRepository::new(pool));

    let service_context = ServiceContext::builder()
        .message_repo(message_repo)
        .sweep_batch_size(config.sweeper.batch_size)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, jwt_service, config))
}

/// Schedule the retention sweeper on a fixed interval
///
/// Returns `None` when the sweeper is disabled. A failed pass is logged and
/// retried on the next tick; abort the handle to stop sweeping.
pub fn spawn_retention_sweeper(ctx: Arc<ServiceContext>, config: &SweeperConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        info!("Retention sweeper disabled");
        return None;
    }

    let period = Duration::from_secs(config.interval_secs.max(1));
    info!(interval_secs = period.as_secs(), batch_size = ctx.sweep_batch_size(), "Scheduling retention sweeper");

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            match RetentionSweeper::new(&ctx).sweep().await {
                Ok(erased) => debug!(erased, "Retention sweep pass finished"),
                Err(e) => warn!(error = %e, "Retention sweep pass failed"),
            }
        }
    }))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let sweeper_config = config.sweeper.clone();
    let state = create_app_state(config).await?;
    let sweeper = spawn_retention_sweeper(state.shared_context(), &sweeper_config);

    let app = create_app(state)?;
    let result = run_server(app, addr).await;

    if let Some(handle) = sweeper {
        handle.abort();
    }

    result
}
