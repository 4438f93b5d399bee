//! Error handling for the Powder Stock Tracker
//!
//! Core operations are non-throwing in the common case: a stale lot
//! reference surfaces as [`AppError::NotFound`], invalid input is rejected
//! before any state change, and durability failures travel on a separate
//! channel so callers can decide whether to surface them.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for store operations
pub type AppResult<T> = Result<T, AppError>;
