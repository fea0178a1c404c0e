//! Vote ledger
//!
//! Per-event view over the active vote set. A user holds at most one
//! selection per dimension; casting the current selection again withdraws
//! it, casting a different option replaces it as one swap. Vote counts,
//! reserved seats and voter lists are always derived from the active rows,
//! never kept as separate counters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::event::EventSnapshot;
use crate::models::option::TimeOptionType;
use crate::models::vote::{Vote, VoteDimension};
use crate::utils::errors::{PlanBuddyError, Result};

/// Net effect of a cast request, committed by the caller as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The user re-cast their current selection; it is withdrawn
    Cleared { previous: Uuid },
    /// The user selected an option, replacing any prior selection atomically
    Selected {
        option_id: Uuid,
        previous: Option<Uuid>,
    },
}

/// Derived single-selection state over an event's active votes
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    votes: Vec<Vote>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the ledger from stored vote rows
    ///
    /// Rows arrive one per (user, dimension); should duplicates ever appear,
    /// the latest cast wins, matching last-write-wins semantics.
    pub fn from_votes(votes: Vec<Vote>) -> Self {
        let mut ledger = Self::new();
        let mut ordered = votes;
        ordered.sort_by_key(|v| v.cast_at);
        for vote in ordered {
            ledger.retain_except(vote.user_id, vote.dimension);
            ledger.votes.push(vote);
        }
        ledger
    }

    /// The user's active selection in a dimension, if any
    pub fn selection(&self, user_id: i64, dimension: VoteDimension) -> Option<Uuid> {
        self.votes
            .iter()
            .find(|v| v.user_id == user_id && v.dimension == dimension)
            .map(|v| v.option_id)
    }

    /// Number of active votes for an option
    pub fn votes_count(&self, dimension: VoteDimension, option_id: Uuid) -> usize {
        self.votes
            .iter()
            .filter(|v| v.dimension == dimension && v.option_id == option_id)
            .count()
    }

    /// Seats taken in a capacity slot; reservations are time votes
    pub fn reserved_count(&self, option_id: Uuid) -> usize {
        self.votes_count(VoteDimension::Time, option_id)
    }

    /// Voter ids for an option, in cast order
    pub fn voters(&self, dimension: VoteDimension, option_id: Uuid) -> Vec<i64> {
        self.votes
            .iter()
            .filter(|v| v.dimension == dimension && v.option_id == option_id)
            .map(|v| v.user_id)
            .collect()
    }

    /// All active votes
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Evaluate a cast/toggle request against the event's rules
    ///
    /// Checks run against a single `now`; the caller must not re-read the
    /// clock for the same request. The returned outcome describes the swap
    /// the persistence gateway must commit as one transactional unit.
    pub fn cast_or_toggle(
        &self,
        snapshot: &EventSnapshot,
        user_id: i64,
        dimension: VoteDimension,
        option_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VoteOutcome> {
        let event = &snapshot.event;

        if let Some(deadline) = event.voting_deadline {
            if now >= deadline {
                return Err(PlanBuddyError::VotingClosed);
            }
        }

        match dimension {
            VoteDimension::Time => {
                if !event.time_option_type.requires_voting() {
                    return Err(PlanBuddyError::NotVotable);
                }
                if snapshot.time_option(option_id).is_none() {
                    return Err(PlanBuddyError::OptionNotFound { option_id });
                }
            }
            VoteDimension::Restaurant => {
                if !event.restaurant_option_type.requires_voting() {
                    return Err(PlanBuddyError::NotVotable);
                }
                if snapshot.restaurant_option(option_id).is_none() {
                    return Err(PlanBuddyError::OptionNotFound { option_id });
                }
            }
        }

        let current = self.selection(user_id, dimension);

        // Re-confirming one's own seat is always allowed; the capacity
        // ceiling counts only the other holders.
        if dimension == VoteDimension::Time
            && event.time_option_type == TimeOptionType::CapacityBased
            && current != Some(option_id)
        {
            let max_capacity = snapshot
                .time_option(option_id)
                .and_then(|o| o.max_capacity)
                .unwrap_or(0);
            let taken_by_others = self
                .voters(VoteDimension::Time, option_id)
                .iter()
                .filter(|id| **id != user_id)
                .count();
            if taken_by_others >= max_capacity as usize {
                return Err(PlanBuddyError::CapacityFull { option_id });
            }
        }

        match current {
            Some(previous) if previous == option_id => Ok(VoteOutcome::Cleared { previous }),
            previous => Ok(VoteOutcome::Selected {
                option_id,
                previous,
            }),
        }
    }

    /// Apply an evaluated outcome to the in-memory vote set
    ///
    /// The old row (if any) is dropped and the new one inserted in one step,
    /// mirroring the swap the gateway performs.
    pub fn apply(
        &mut self,
        event_id: i64,
        user_id: i64,
        dimension: VoteDimension,
        outcome: VoteOutcome,
        now: DateTime<Utc>,
    ) {
        self.retain_except(user_id, dimension);
        if let VoteOutcome::Selected { option_id, .. } = outcome {
            self.votes.push(Vote {
                event_id,
                user_id,
                dimension,
                option_id,
                cast_at: now,
            });
        }
    }

    fn retain_except(&mut self, user_id: i64, dimension: VoteDimension) {
        self.votes
            .retain(|v| !(v.user_id == user_id && v.dimension == dimension));
    }
}
