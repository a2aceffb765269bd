//! # atelier-service
//!
//! Application layer: the message lifecycle services, their DTOs, and the
//! shared service context.

pub mod dto;
pub mod services;

pub use services::{
    BulkOperationGuard, MessageService, ModerationService, ReadTracker, RetentionSweeper,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, VisibilityManager,
};
