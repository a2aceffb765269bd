//! # atelier-db
//!
//! Database layer implementing the message repository with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - `PgMessageRepository`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_db::pool::{create_pool, migrations_dir, run_migrations, DatabaseConfig};
//! use atelier_db::PgMessageRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, migrations_dir()).await?;
//!     let repo = PgMessageRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, migrations_dir, run_migrations, DatabaseConfig, PgPool};
pub use repositories::PgMessageRepository;
