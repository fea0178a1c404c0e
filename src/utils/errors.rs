//! Error handling for PlanBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

use crate::models::validation::ValidationErrors;

/// Main error type for PlanBuddy application
#[derive(Error, Debug)]
pub enum PlanBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Option not found: {option_id}")]
    OptionNotFound { option_id: Uuid },

    /// Field-level draft validation failures, accumulated in full
    #[error("Validation failed ({} problem(s))", .0.len())]
    Validation(ValidationErrors),

    /// The voting deadline has passed
    #[error("Voting is closed")]
    VotingClosed,

    /// The target capacity slot has no open seat left
    #[error("Option {option_id} is at capacity")]
    CapacityFull { option_id: Uuid },

    /// The dimension carries no voting affordance
    #[error("This option is not open for voting")]
    NotVotable,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for PlanBuddy operations
pub type Result<T> = std::result::Result<T, PlanBuddyError>;

impl PlanBuddyError {
    /// Check if the error is recoverable
    ///
    /// Business-rule rejections are terminal for the request that hit them:
    /// repeating the identical call cannot succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PlanBuddyError::Database(_) => true,
            PlanBuddyError::Migration(_) => false,
            PlanBuddyError::Config(_) => false,
            PlanBuddyError::PermissionDenied(_) => false,
            PlanBuddyError::UserNotFound { .. } => false,
            PlanBuddyError::EventNotFound { .. } => false,
            PlanBuddyError::OptionNotFound { .. } => false,
            PlanBuddyError::Validation(_) => false,
            PlanBuddyError::VotingClosed => false,
            PlanBuddyError::CapacityFull { .. } => false,
            PlanBuddyError::NotVotable => false,
            PlanBuddyError::Serialization(_) => false,
            PlanBuddyError::Io(_) => true,
            PlanBuddyError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlanBuddyError::Database(_) => ErrorSeverity::Critical,
            PlanBuddyError::Migration(_) => ErrorSeverity::Critical,
            PlanBuddyError::Config(_) => ErrorSeverity::Critical,
            PlanBuddyError::PermissionDenied(_) => ErrorSeverity::Warning,
            PlanBuddyError::Validation(_) => ErrorSeverity::Info,
            PlanBuddyError::VotingClosed => ErrorSeverity::Info,
            PlanBuddyError::CapacityFull { .. } => ErrorSeverity::Info,
            PlanBuddyError::NotVotable => ErrorSeverity::Info,
            PlanBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
