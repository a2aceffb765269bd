//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BulkDeleteRequest, BulkReadRequest, DeleteMessageRequest, DeleteStrategy, ListMessagesParams,
    QueueParams, RejectMessageRequest, SendMessageRequest, MAX_BATCH_SIZE, MAX_REASON_LENGTH,
};

pub use responses::{
    BulkDeletedResponse, BulkUpdatedResponse, HealthChecks, HealthResponse, MessageResponse,
    ReadinessResponse, UnreadCountResponse,
};
