//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the token verifier and the loaded configuration.

use std::sync::Arc;

use atelier_common::{AppConfig, JwtService};
use atelier_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    jwt_service: Arc<JwtService>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, jwt_service: JwtService, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context, for background tasks
    pub fn shared_context(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("jwt_service", &"JwtService")
            .field("config", &"AppConfig")
            .finish()
    }
}
