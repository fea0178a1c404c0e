//! Vote model
//!
//! One row per (event, user, dimension): a participant's vote is a single
//! selection per dimension, not a set. Re-casting the same option clears the
//! row; casting a different option replaces it atomically.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One of the two independent voting axes on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDimension {
    Time,
    Restaurant,
}

impl VoteDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDimension::Time => "time",
            VoteDimension::Restaurant => "restaurant",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "time" => Some(VoteDimension::Time),
            "restaurant" => Some(VoteDimension::Restaurant),
            _ => None,
        }
    }
}

impl std::fmt::Display for VoteDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active vote (or seat reservation) by one user in one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub event_id: i64,
    pub user_id: i64,
    pub dimension: VoteDimension,
    pub option_id: Uuid,
    pub cast_at: DateTime<Utc>,
}
