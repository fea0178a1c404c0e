//! Event service implementation
//!
//! This service owns the event scheduling aggregate: draft submission,
//! edits, read-model assembly and closing the vote. Validation failures are
//! returned in full so the wizard can render every problem at once.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::database::repositories::{EventRepository, UserRepository};
use crate::models::event::{Event, EventView};
use crate::models::option::{RestaurantOptionView, TimeOptionView};
use crate::models::user::User;
use crate::models::vote::VoteDimension;
use crate::utils::errors::{PlanBuddyError, Result};
use crate::utils::logging::log_event_action;
use crate::voting::{
    can_close_voting, is_voting_closed, winning_restaurant_option, winning_time_option, VoteLedger,
};
use crate::wizard::EventDraft;

/// Event service for creating, editing, reading and closing events
#[derive(Clone)]
pub struct EventService {
    event_repository: EventRepository,
    user_repository: UserRepository,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(event_repository: EventRepository, user_repository: UserRepository) -> Self {
        Self {
            event_repository,
            user_repository,
        }
    }

    /// Validate and persist a creation-wizard draft
    pub async fn submit_draft(&self, draft: EventDraft) -> Result<Event> {
        let now = Utc::now();
        let creator_id = draft.creator_id;
        debug!(creator_id = creator_id, "Submitting event draft");

        let request = draft
            .into_create_request(now)
            .map_err(PlanBuddyError::Validation)?;

        let event = self.event_repository.create(request).await?;
        info!(event_id = event.id, creator_id = creator_id, "Event created");
        log_event_action(event.id, "created", creator_id, None);
        Ok(event)
    }

    /// Validate and persist an edit-wizard draft; creator only
    pub async fn update_event(
        &self,
        event_id: i64,
        actor_id: i64,
        draft: EventDraft,
    ) -> Result<Event> {
        let now = Utc::now();
        debug!(event_id = event_id, actor_id = actor_id, "Updating event");

        let existing = self
            .event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(PlanBuddyError::EventNotFound { event_id })?;

        if existing.creator_id != actor_id {
            warn!(event_id = event_id, actor_id = actor_id, "Edit rejected: not the creator");
            return Err(PlanBuddyError::PermissionDenied(
                "Only the creator can edit an event".to_string(),
            ));
        }

        let request = draft
            .into_update_request(now)
            .map_err(PlanBuddyError::Validation)?;

        let event = self.event_repository.update(event_id, request).await?;
        log_event_action(event_id, "updated", actor_id, None);
        Ok(event)
    }

    /// Assemble the read model for one viewer
    pub async fn get_event_view(&self, event_id: i64, viewer_id: i64) -> Result<EventView> {
        let now = Utc::now();
        build_event_view(
            &self.event_repository,
            &self.user_repository,
            event_id,
            viewer_id,
            now,
        )
        .await
    }

    /// Whether the viewer may close voting early
    pub async fn can_close_voting(&self, event_id: i64, viewer_id: i64) -> Result<bool> {
        let now = Utc::now();
        let snapshot = self
            .event_repository
            .load_snapshot(event_id)
            .await?
            .ok_or(PlanBuddyError::EventNotFound { event_id })?;
        let ledger = VoteLedger::from_votes(snapshot.votes.clone());
        Ok(can_close_voting(&snapshot, &ledger, viewer_id, now))
    }

    /// Close voting early by moving the deadline to "now"
    ///
    /// Refused until the creator's own selections are complete for every
    /// dimension the event requires voting for.
    pub async fn close_voting(&self, event_id: i64, actor_id: i64) -> Result<Event> {
        let now = Utc::now();
        let snapshot = self
            .event_repository
            .load_snapshot(event_id)
            .await?
            .ok_or(PlanBuddyError::EventNotFound { event_id })?;
        let ledger = VoteLedger::from_votes(snapshot.votes.clone());

        if !can_close_voting(&snapshot, &ledger, actor_id, now) {
            warn!(event_id = event_id, actor_id = actor_id, "Close voting rejected");
            return Err(PlanBuddyError::PermissionDenied(
                "Voting can only be closed by the creator after they voted in every open dimension"
                    .to_string(),
            ));
        }

        let event = self.event_repository.close_voting(event_id, now).await?;
        log_event_action(event_id, "voting_closed", actor_id, None);
        Ok(event)
    }

    /// Events the user participates in
    pub async fn get_user_events(&self, user_id: i64) -> Result<Vec<Event>> {
        self.event_repository.get_user_events(user_id).await
    }

    /// Delete an event; creator only
    pub async fn delete_event(&self, event_id: i64, actor_id: i64) -> Result<()> {
        let existing = self
            .event_repository
            .find_by_id(event_id)
            .await?
            .ok_or(PlanBuddyError::EventNotFound { event_id })?;

        if existing.creator_id != actor_id {
            return Err(PlanBuddyError::PermissionDenied(
                "Only the creator can delete an event".to_string(),
            ));
        }

        self.event_repository.delete(event_id).await?;
        log_event_action(event_id, "deleted", actor_id, None);
        Ok(())
    }
}

/// Assemble the read model for one viewer at one point in time
///
/// Counts, voter lists and winners are derived from the vote rows loaded
/// with the snapshot; nothing is read twice, so the whole view reflects one
/// consistent state.
pub(crate) async fn build_event_view(
    event_repository: &EventRepository,
    user_repository: &UserRepository,
    event_id: i64,
    viewer_id: i64,
    now: DateTime<Utc>,
) -> Result<EventView> {
    let snapshot = event_repository
        .load_snapshot(event_id)
        .await?
        .ok_or(PlanBuddyError::EventNotFound { event_id })?;
    let ledger = VoteLedger::from_votes(snapshot.votes.clone());

    let participants = user_repository
        .list_by_ids(&snapshot.participant_ids)
        .await?;
    let users_by_id: HashMap<i64, User> =
        participants.iter().map(|u| (u.id, u.clone())).collect();
    let resolve = |ids: Vec<i64>| -> Vec<User> {
        ids.into_iter()
            .filter_map(|id| users_by_id.get(&id).cloned())
            .collect()
    };

    let voting_closed = is_voting_closed(&snapshot, now);
    let winning_time = if voting_closed {
        winning_time_option(&snapshot, &ledger)
    } else {
        None
    };
    let winning_restaurant = if voting_closed {
        winning_restaurant_option(&snapshot, &ledger)
    } else {
        None
    };

    let time_options = snapshot
        .time_options
        .iter()
        .map(|option| {
            let votes_count = ledger.votes_count(VoteDimension::Time, option.id);
            let remaining_capacity = option
                .max_capacity
                .map(|capacity| (capacity - votes_count as i32).max(0));
            TimeOptionView {
                option: option.clone(),
                votes_count,
                remaining_capacity,
                voted_users: resolve(ledger.voters(VoteDimension::Time, option.id)),
            }
        })
        .collect();

    let restaurant_options = snapshot
        .restaurant_options
        .iter()
        .map(|option| RestaurantOptionView {
            option: option.clone(),
            votes_count: ledger.votes_count(VoteDimension::Restaurant, option.id),
            voted_users: resolve(ledger.voters(VoteDimension::Restaurant, option.id)),
        })
        .collect();

    debug!(event_id = event_id, viewer_id = viewer_id, closed = voting_closed, "Event view assembled");

    Ok(EventView {
        viewer_time_selection: ledger.selection(viewer_id, VoteDimension::Time),
        viewer_restaurant_selection: ledger.selection(viewer_id, VoteDimension::Restaurant),
        event: snapshot.event,
        participants,
        time_options,
        restaurant_options,
        voting_closed,
        winning_time_option: winning_time,
        winning_restaurant_option: winning_restaurant,
    })
}
