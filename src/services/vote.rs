//! Vote service implementation
//!
//! One request, one clock read: the deadline check, the ledger evaluation
//! and the persisted swap all see the same "now". The returned view carries
//! the authoritative post-commit counts; callers never flip local state
//! optimistically.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::database::repositories::{EventRepository, UserRepository, VoteRepository};
use crate::models::event::EventView;
use crate::models::vote::VoteDimension;
use crate::utils::errors::{PlanBuddyError, Result};
use crate::utils::logging::{log_vote_action, log_vote_rejection};
use crate::voting::{VoteLedger, VoteOutcome};
use super::event::build_event_view;

/// Vote service handling cast, toggle and reservation requests
#[derive(Clone)]
pub struct VoteService {
    event_repository: EventRepository,
    vote_repository: VoteRepository,
    user_repository: UserRepository,
}

impl VoteService {
    /// Create a new VoteService instance
    pub fn new(
        event_repository: EventRepository,
        vote_repository: VoteRepository,
        user_repository: UserRepository,
    ) -> Self {
        Self {
            event_repository,
            vote_repository,
            user_repository,
        }
    }

    /// Cast, replace or withdraw the user's selection in one dimension
    ///
    /// Casting the currently selected option withdraws it; casting a
    /// different option replaces the old selection as one atomic swap. The
    /// authoritative updated view is returned after the commit.
    pub async fn cast_or_toggle(
        &self,
        event_id: i64,
        user_id: i64,
        dimension: VoteDimension,
        option_id: Uuid,
    ) -> Result<(VoteOutcome, EventView)> {
        let now = Utc::now();
        debug!(
            event_id = event_id,
            user_id = user_id,
            dimension = %dimension,
            option_id = %option_id,
            "Processing vote request"
        );

        let snapshot = self
            .event_repository
            .load_snapshot(event_id)
            .await?
            .ok_or(PlanBuddyError::EventNotFound { event_id })?;

        if !snapshot.is_participant(user_id) {
            log_vote_rejection(event_id, user_id, dimension.as_str(), "not_participant");
            return Err(PlanBuddyError::PermissionDenied(
                "Only invited participants can vote".to_string(),
            ));
        }

        let ledger = VoteLedger::from_votes(snapshot.votes.clone());
        let outcome = match ledger.cast_or_toggle(&snapshot, user_id, dimension, option_id, now) {
            Ok(outcome) => outcome,
            Err(error) => {
                log_vote_rejection(event_id, user_id, dimension.as_str(), &error.to_string());
                return Err(error);
            }
        };

        self.vote_repository
            .apply_vote(event_id, user_id, dimension, &outcome, now)
            .await?;

        let action = match outcome {
            VoteOutcome::Cleared { .. } => "withdrawn",
            VoteOutcome::Selected { previous: None, .. } => "cast",
            VoteOutcome::Selected { previous: Some(_), .. } => "replaced",
        };
        log_vote_action(event_id, user_id, dimension.as_str(), action);

        let view = build_event_view(
            &self.event_repository,
            &self.user_repository,
            event_id,
            user_id,
            now,
        )
        .await?;

        Ok((outcome, view))
    }
}
