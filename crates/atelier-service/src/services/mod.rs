//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` for the duration of a
//! single operation.

pub mod bulk;
pub mod context;
pub mod error;
pub mod message;
pub mod moderation;
pub mod read_tracker;
pub mod retention;
pub mod visibility;

pub use bulk::{parse_batch, BulkOperationGuard};
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_SWEEP_BATCH_SIZE};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use moderation::ModerationService;
pub use read_tracker::ReadTracker;
pub use retention::RetentionSweeper;
pub use visibility::VisibilityManager;
