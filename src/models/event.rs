//! Event model
//!
//! An event composes the two voting dimensions, the participant set and the
//! voting deadline. The read model (`EventView`) carries the derived vote
//! counts and, once voting has closed, the resolved winners.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::option::{
    RestaurantOption, RestaurantOptionType, RestaurantOptionView, TimeOption, TimeOptionType,
    TimeOptionView,
};
use crate::models::user::User;
use crate::models::vote::Vote;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    /// Required whenever any dimension is in a voting mode; `None` for a
    /// fully fixed event
    pub voting_deadline: Option<DateTime<Utc>>,
    pub time_option_type: TimeOptionType,
    pub restaurant_option_type: RestaurantOptionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether any dimension of this event accepts participant votes
    pub fn requires_voting(&self) -> bool {
        self.time_option_type.requires_voting() || self.restaurant_option_type.requires_voting()
    }
}

/// Everything the voting core needs to evaluate one event: the entity, its
/// ordered option lists, the participant set and the active votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub event: Event,
    pub time_options: Vec<TimeOption>,
    pub restaurant_options: Vec<RestaurantOption>,
    pub participant_ids: Vec<i64>,
    pub votes: Vec<Vote>,
}

impl EventSnapshot {
    pub fn time_option(&self, option_id: Uuid) -> Option<&TimeOption> {
        self.time_options.iter().find(|o| o.id == option_id)
    }

    pub fn restaurant_option(&self, option_id: Uuid) -> Option<&RestaurantOption> {
        self.restaurant_options.iter().find(|o| o.id == option_id)
    }

    pub fn is_participant(&self, user_id: i64) -> bool {
        self.participant_ids.contains(&user_id)
    }
}

/// A validated new time option, id already assigned at draft time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimeOption {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: Option<i32>,
}

/// A validated new restaurant option, id already assigned at draft time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestaurantOption {
    pub id: Uuid,
    pub name: String,
    pub menu_image_url: Option<String>,
    pub restaurant_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub participant_ids: Vec<i64>,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub time_option_type: TimeOptionType,
    pub time_options: Vec<NewTimeOption>,
    pub restaurant_option_type: RestaurantOptionType,
    pub restaurant_options: Vec<NewRestaurantOption>,
}

/// Full-replace update produced by the edit wizard; the whole validated
/// draft is resubmitted, not a field-by-field patch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub participant_ids: Vec<i64>,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub time_option_type: TimeOptionType,
    pub time_options: Vec<NewTimeOption>,
    pub restaurant_option_type: RestaurantOptionType,
    pub restaurant_options: Vec<NewRestaurantOption>,
}

/// Read model assembled for one viewer at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub event: Event,
    pub participants: Vec<User>,
    pub time_options: Vec<TimeOptionView>,
    pub restaurant_options: Vec<RestaurantOptionView>,
    pub viewer_time_selection: Option<Uuid>,
    pub viewer_restaurant_selection: Option<Uuid>,
    pub voting_closed: bool,
    pub winning_time_option: Option<Uuid>,
    pub winning_restaurant_option: Option<Uuid>,
}

impl EventView {
    /// The viewer's own selection while voting is open, the resolved winner
    /// once it has closed
    pub fn effective_time_selection(&self) -> Option<Uuid> {
        if self.voting_closed {
            self.winning_time_option
        } else {
            self.viewer_time_selection
        }
    }

    pub fn effective_restaurant_selection(&self) -> Option<Uuid> {
        if self.voting_closed {
            self.winning_restaurant_option
        } else {
            self.viewer_restaurant_selection
        }
    }
}
