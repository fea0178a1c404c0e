//! Vote repository implementation
//!
//! The vote swap and the capacity re-check run inside a single transaction:
//! the target slot row is locked before the count is taken, so two racing
//! reservations for the last open seat serialize and the loser sees
//! `CapacityFull`. Options are independent lock targets.

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::vote::{Vote, VoteDimension};
use crate::utils::errors::PlanBuddyError;
use crate::voting::ledger::VoteOutcome;

#[derive(Debug, Clone)]
pub struct VoteRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
pub(crate) struct VoteRow {
    pub event_id: i64,
    pub user_id: i64,
    pub dimension: String,
    pub option_id: Uuid,
    pub cast_at: DateTime<Utc>,
}

impl VoteRow {
    pub(crate) fn into_vote(self) -> Result<Vote, PlanBuddyError> {
        let dimension = VoteDimension::parse(&self.dimension).ok_or_else(|| {
            PlanBuddyError::InvalidInput(format!("Unknown vote dimension: {}", self.dimension))
        })?;
        Ok(Vote {
            event_id: self.event_id,
            user_id: self.user_id,
            dimension,
            option_id: self.option_id,
            cast_at: self.cast_at,
        })
    }
}

impl VoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active votes for an event, in cast order
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<Vote>, PlanBuddyError> {
        let rows = sqlx::query_as::<_, VoteRow>(
            "SELECT event_id, user_id, dimension, option_id, cast_at FROM votes WHERE event_id = $1 ORDER BY cast_at ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(VoteRow::into_vote).collect()
    }

    /// A user's active selection in one dimension
    pub async fn find_selection(
        &self,
        event_id: i64,
        user_id: i64,
        dimension: VoteDimension,
    ) -> Result<Option<Vote>, PlanBuddyError> {
        let row = sqlx::query_as::<_, VoteRow>(
            "SELECT event_id, user_id, dimension, option_id, cast_at FROM votes WHERE event_id = $1 AND user_id = $2 AND dimension = $3"
        )
        .bind(event_id)
        .bind(user_id)
        .bind(dimension.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(VoteRow::into_vote).transpose()
    }

    /// Commit an evaluated vote outcome as one transactional unit
    ///
    /// For a selection in the time dimension the target slot row is locked
    /// and the seat count re-checked under the lock before the swap is
    /// written; a full slot rolls back with `CapacityFull`.
    pub async fn apply_vote(
        &self,
        event_id: i64,
        user_id: i64,
        dimension: VoteDimension,
        outcome: &VoteOutcome,
        now: DateTime<Utc>,
    ) -> Result<(), PlanBuddyError> {
        let mut tx = self.pool.begin().await?;

        match outcome {
            VoteOutcome::Cleared { .. } => {
                sqlx::query(
                    "DELETE FROM votes WHERE event_id = $1 AND user_id = $2 AND dimension = $3"
                )
                .bind(event_id)
                .bind(user_id)
                .bind(dimension.as_str())
                .execute(&mut *tx)
                .await?;
            }
            VoteOutcome::Selected { option_id, .. } => {
                if dimension == VoteDimension::Time {
                    let slot: Option<(Option<i32>,)> = sqlx::query_as(
                        "SELECT max_capacity FROM time_options WHERE id = $1 AND event_id = $2 FOR UPDATE"
                    )
                    .bind(option_id)
                    .bind(event_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    let max_capacity = slot
                        .ok_or(PlanBuddyError::OptionNotFound { option_id: *option_id })?
                        .0;

                    if let Some(capacity) = max_capacity {
                        let taken_by_others: (i64,) = sqlx::query_as(
                            "SELECT COUNT(*) FROM votes WHERE event_id = $1 AND dimension = 'time' AND option_id = $2 AND user_id <> $3"
                        )
                        .bind(event_id)
                        .bind(option_id)
                        .bind(user_id)
                        .fetch_one(&mut *tx)
                        .await?;

                        if taken_by_others.0 >= capacity as i64 {
                            return Err(PlanBuddyError::CapacityFull { option_id: *option_id });
                        }
                    }
                }

                sqlx::query(
                    r#"
                    INSERT INTO votes (event_id, user_id, dimension, option_id, cast_at)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (event_id, user_id, dimension)
                    DO UPDATE SET option_id = EXCLUDED.option_id, cast_at = EXCLUDED.cast_at
                    "#
                )
                .bind(event_id)
                .bind(user_id)
                .bind(dimension.as_str())
                .bind(option_id)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
