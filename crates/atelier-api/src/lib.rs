//! # atelier-api
//!
//! REST surface for the direct-message lifecycle, built with Axum.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, spawn_retention_sweeper};
pub use state::AppState;
