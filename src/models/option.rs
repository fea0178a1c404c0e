//! Scheduling option models
//!
//! Each event has two independent voting dimensions (time and restaurant),
//! each governed by a scheduling mode. Vote counts and voter lists on an
//! option are derived from the active vote set on read, never stored.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::User;

/// Upper bound on the number of options per dimension
pub const MAX_OPTIONS: usize = 6;

/// Lower bound while a dimension is active
pub const MIN_OPTIONS: usize = 1;

/// Scheduling mode of the time dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOptionType {
    /// A single fixed time slot, no voting
    Fixed,
    /// Participants vote for one of 2-6 proposed slots
    Voting,
    /// Participants reserve a seat in one of 2-6 capacity-limited slots
    CapacityBased,
}

impl TimeOptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOptionType::Fixed => "fixed",
            TimeOptionType::Voting => "voting",
            TimeOptionType::CapacityBased => "capacity_based",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(TimeOptionType::Fixed),
            "voting" => Some(TimeOptionType::Voting),
            "capacity_based" => Some(TimeOptionType::CapacityBased),
            _ => None,
        }
    }

    /// Whether this mode accepts participant votes
    pub fn requires_voting(&self) -> bool {
        !matches!(self, TimeOptionType::Fixed)
    }

    /// Whether this mode carries a 2-6 option list
    pub fn is_multi_option(&self) -> bool {
        matches!(self, TimeOptionType::Voting | TimeOptionType::CapacityBased)
    }
}

impl std::fmt::Display for TimeOptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduling mode of the restaurant dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantOptionType {
    /// A single fixed restaurant, no voting
    Fixed,
    /// Participants vote for one of 2-6 proposed restaurants
    Voting,
    /// The event has no restaurant dimension
    None,
}

impl RestaurantOptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantOptionType::Fixed => "fixed",
            RestaurantOptionType::Voting => "voting",
            RestaurantOptionType::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(RestaurantOptionType::Fixed),
            "voting" => Some(RestaurantOptionType::Voting),
            "none" => Some(RestaurantOptionType::None),
            _ => None,
        }
    }

    pub fn requires_voting(&self) -> bool {
        matches!(self, RestaurantOptionType::Voting)
    }

    pub fn is_multi_option(&self) -> bool {
        matches!(self, RestaurantOptionType::Voting)
    }

    /// Whether this mode carries any option list at all
    pub fn has_options(&self) -> bool {
        !matches!(self, RestaurantOptionType::None)
    }
}

impl std::fmt::Display for RestaurantOptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed time slot
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeOption {
    pub id: Uuid,
    pub event_id: i64,
    pub position: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seat ceiling, meaningful only under `CapacityBased`
    pub max_capacity: Option<i32>,
}

/// A proposed restaurant
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RestaurantOption {
    pub id: Uuid,
    pub event_id: i64,
    pub position: i32,
    pub name: String,
    pub menu_image_url: Option<String>,
    pub restaurant_url: Option<String>,
}

/// Time option enriched with vote-derived read-model data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOptionView {
    #[serde(flatten)]
    pub option: TimeOption,
    pub votes_count: usize,
    /// Seats still open, only present under `CapacityBased`
    pub remaining_capacity: Option<i32>,
    pub voted_users: Vec<User>,
}

/// Restaurant option enriched with vote-derived read-model data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantOptionView {
    #[serde(flatten)]
    pub option: RestaurantOption,
    pub votes_count: usize,
    pub voted_users: Vec<User>,
}
