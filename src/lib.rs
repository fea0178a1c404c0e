//! PlanBuddy
//!
//! Group event planning with time slot and restaurant voting. A creator
//! proposes an event with alternative time slots and/or restaurant choices;
//! invited participants vote on (or reserve) one option per dimension until
//! the voting deadline, after which a winner is resolved deterministically.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;
pub mod voting;
pub mod wizard;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PlanBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use voting::{VoteLedger, VoteOutcome};
pub use wizard::EventDraft;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
