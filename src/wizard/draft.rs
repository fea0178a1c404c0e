//! Event draft
//!
//! The wizard's working value. A draft is immutable from the caller's point
//! of view: every update consumes the draft and returns the updated one, so
//! each wizard step threads an explicit value instead of sharing mutable
//! form state. Date/time and capacity fields stay raw text until validation,
//! so `Required` and `InvalidFormat` remain distinguishable.

use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::{CreateEventRequest, EventSnapshot, UpdateEventRequest};
use crate::models::option::{RestaurantOptionType, TimeOptionType};
use crate::models::validation::ValidationErrors;
use crate::utils::time::format_minute;
use super::options;
use super::validation;

/// A time slot being entered in the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOptionDraft {
    pub id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: String,
}

impl TimeOptionDraft {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time: String::new(),
            end_time: String::new(),
            max_capacity: String::new(),
        }
    }
}

/// A restaurant being entered in the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantOptionDraft {
    pub id: Uuid,
    pub name: String,
    pub menu_image_url: String,
    pub restaurant_url: String,
}

impl RestaurantOptionDraft {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            menu_image_url: String::new(),
            restaurant_url: String::new(),
        }
    }
}

/// The event creation/edit wizard's draft value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub creator_id: i64,
    pub participant_ids: BTreeSet<i64>,
    /// Raw deadline field; cleared whenever no dimension requires voting
    pub voting_deadline: String,
    pub time_option_type: TimeOptionType,
    pub time_options: Vec<TimeOptionDraft>,
    pub restaurant_option_type: RestaurantOptionType,
    pub restaurant_options: Vec<RestaurantOptionDraft>,
}

impl EventDraft {
    /// Fresh draft: a single fixed time slot and no restaurant dimension
    pub fn new(creator_id: i64) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            creator_id,
            participant_ids: BTreeSet::from([creator_id]),
            voting_deadline: String::new(),
            time_option_type: TimeOptionType::Fixed,
            time_options: vec![TimeOptionDraft::blank()],
            restaurant_option_type: RestaurantOptionType::None,
            restaurant_options: Vec::new(),
        }
    }

    /// Prefill a draft from a persisted event for the edit wizard
    pub fn from_snapshot(snapshot: &EventSnapshot) -> Self {
        let event = &snapshot.event;
        let mut participant_ids: BTreeSet<i64> = snapshot.participant_ids.iter().copied().collect();
        participant_ids.insert(event.creator_id);
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            creator_id: event.creator_id,
            participant_ids,
            voting_deadline: event.voting_deadline.map(format_minute).unwrap_or_default(),
            time_option_type: event.time_option_type,
            time_options: snapshot
                .time_options
                .iter()
                .map(|o| TimeOptionDraft {
                    id: o.id,
                    start_time: format_minute(o.start_time),
                    end_time: format_minute(o.end_time),
                    max_capacity: o.max_capacity.map(|c| c.to_string()).unwrap_or_default(),
                })
                .collect(),
            restaurant_option_type: event.restaurant_option_type,
            restaurant_options: snapshot
                .restaurant_options
                .iter()
                .map(|o| RestaurantOptionDraft {
                    id: o.id,
                    name: o.name.clone(),
                    menu_image_url: o.menu_image_url.clone().unwrap_or_default(),
                    restaurant_url: o.restaurant_url.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_voting_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.voting_deadline = deadline.into();
        self
    }

    pub fn add_participant(mut self, user_id: i64) -> Self {
        self.participant_ids.insert(user_id);
        self
    }

    /// Remove a participant; the creator is implicitly included and cannot
    /// be removed
    pub fn remove_participant(mut self, user_id: i64) -> Self {
        if user_id != self.creator_id {
            self.participant_ids.remove(&user_id);
        }
        self
    }

    /// Switch the time dimension's scheduling mode, reshaping the option
    /// list accordingly
    pub fn set_time_mode(mut self, mode: TimeOptionType) -> Self {
        self.time_options = options::reshape_time(self.time_options, self.time_option_type, mode);
        self.time_option_type = mode;
        self.clear_stale_deadline();
        self
    }

    /// Switch the restaurant dimension's scheduling mode
    pub fn set_restaurant_mode(mut self, mode: RestaurantOptionType) -> Self {
        self.restaurant_options =
            options::reshape_restaurant(self.restaurant_options, self.restaurant_option_type, mode);
        self.restaurant_option_type = mode;
        self.clear_stale_deadline();
        self
    }

    /// Append a blank time slot; silent no-op at 6 options or outside the
    /// multi-option modes
    pub fn add_time_option(mut self) -> Self {
        if self.time_option_type.is_multi_option() {
            self.time_options = options::push_bounded(self.time_options, TimeOptionDraft::blank());
        }
        self
    }

    /// Remove a time slot; silent no-op on the last remaining option or an
    /// unknown id
    pub fn remove_time_option(mut self, id: Uuid) -> Self {
        self.time_options = options::remove_bounded(self.time_options, |o| o.id == id);
        self
    }

    /// Append a blank restaurant; silent no-op at 6 options or outside the
    /// voting mode
    pub fn add_restaurant_option(mut self) -> Self {
        if self.restaurant_option_type.is_multi_option() {
            self.restaurant_options =
                options::push_bounded(self.restaurant_options, RestaurantOptionDraft::blank());
        }
        self
    }

    /// Remove a restaurant; silent no-op on the last remaining option or an
    /// unknown id
    pub fn remove_restaurant_option(mut self, id: Uuid) -> Self {
        self.restaurant_options = options::remove_bounded(self.restaurant_options, |o| o.id == id);
        self
    }

    pub fn set_time_option_start(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.time_options.iter_mut().find(|o| o.id == id) {
            option.start_time = value.into();
        }
        self
    }

    pub fn set_time_option_end(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.time_options.iter_mut().find(|o| o.id == id) {
            option.end_time = value.into();
        }
        self
    }

    pub fn set_time_option_capacity(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.time_options.iter_mut().find(|o| o.id == id) {
            option.max_capacity = value.into();
        }
        self
    }

    pub fn set_restaurant_option_name(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.restaurant_options.iter_mut().find(|o| o.id == id) {
            option.name = value.into();
        }
        self
    }

    pub fn set_restaurant_option_menu_url(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.restaurant_options.iter_mut().find(|o| o.id == id) {
            option.menu_image_url = value.into();
        }
        self
    }

    pub fn set_restaurant_option_url(mut self, id: Uuid, value: impl Into<String>) -> Self {
        if let Some(option) = self.restaurant_options.iter_mut().find(|o| o.id == id) {
            option.restaurant_url = value.into();
        }
        self
    }

    /// Whether the current mode combination requires a voting deadline
    pub fn requires_voting_deadline(&self) -> bool {
        self.time_option_type.requires_voting() || self.restaurant_option_type.requires_voting()
    }

    /// Validate the whole draft, accumulating every outstanding problem
    pub fn validate(&self, now: DateTime<Utc>) -> ValidationErrors {
        validation::validate_draft(self, now)
    }

    /// Validate and convert into a create request
    pub fn into_create_request(
        self,
        now: DateTime<Utc>,
    ) -> std::result::Result<CreateEventRequest, ValidationErrors> {
        validation::build_create_request(self, now)
    }

    /// Validate and convert into a full-replace update request
    pub fn into_update_request(
        self,
        now: DateTime<Utc>,
    ) -> std::result::Result<UpdateEventRequest, ValidationErrors> {
        validation::build_update_request(self, now)
    }

    // A deadline only makes sense while some dimension is voted on; clear it
    // explicitly rather than persisting a stale value.
    fn clear_stale_deadline(&mut self) {
        if !self.requires_voting_deadline() {
            self.voting_deadline.clear();
        }
    }
}
