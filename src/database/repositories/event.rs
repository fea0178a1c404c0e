//! Event repository implementation

use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::event::{
    CreateEventRequest, Event, EventSnapshot, NewRestaurantOption, NewTimeOption,
    UpdateEventRequest,
};
use crate::models::option::{RestaurantOption, RestaurantOptionType, TimeOption, TimeOptionType};
use crate::utils::errors::PlanBuddyError;
use super::vote::VoteRow;

const EVENT_COLUMNS: &str = "id, title, description, creator_id, voting_deadline, time_option_type, restaurant_option_type, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    creator_id: i64,
    voting_deadline: Option<DateTime<Utc>>,
    time_option_type: String,
    restaurant_option_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self) -> Result<Event, PlanBuddyError> {
        let time_option_type = TimeOptionType::parse(&self.time_option_type).ok_or_else(|| {
            PlanBuddyError::InvalidInput(format!(
                "Unknown time option type: {}",
                self.time_option_type
            ))
        })?;
        let restaurant_option_type = RestaurantOptionType::parse(&self.restaurant_option_type)
            .ok_or_else(|| {
                PlanBuddyError::InvalidInput(format!(
                    "Unknown restaurant option type: {}",
                    self.restaurant_option_type
                ))
            })?;
        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            creator_id: self.creator_id,
            voting_deadline: self.voting_deadline,
            time_option_type,
            restaurant_option_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event with its options and participant set
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, PlanBuddyError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (title, description, creator_id, voting_deadline, time_option_type, restaurant_option_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.creator_id)
        .bind(request.voting_deadline)
        .bind(request.time_option_type.as_str())
        .bind(request.restaurant_option_type.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let event = row.into_event()?;

        insert_participants(&mut tx, event.id, &request.participant_ids).await?;
        insert_time_options(&mut tx, event.id, &request.time_options).await?;
        insert_restaurant_options(&mut tx, event.id, &request.restaurant_options).await?;

        tx.commit().await?;
        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, PlanBuddyError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EventRow::into_event).transpose()
    }

    /// Load the full snapshot the voting core evaluates: event, ordered
    /// option lists, participant set and active votes
    pub async fn load_snapshot(&self, id: i64) -> Result<Option<EventSnapshot>, PlanBuddyError> {
        let event = match self.find_by_id(id).await? {
            Some(event) => event,
            None => return Ok(None),
        };

        let time_options = sqlx::query_as::<_, TimeOption>(
            "SELECT id, event_id, position, start_time, end_time, max_capacity FROM time_options WHERE event_id = $1 ORDER BY position ASC"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let restaurant_options = sqlx::query_as::<_, RestaurantOption>(
            "SELECT id, event_id, position, name, menu_image_url, restaurant_url FROM restaurant_options WHERE event_id = $1 ORDER BY position ASC"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let participant_ids: Vec<(i64,)> = sqlx::query_as(
            "SELECT user_id FROM event_participants WHERE event_id = $1 ORDER BY added_at ASC"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let vote_rows = sqlx::query_as::<_, VoteRow>(
            "SELECT event_id, user_id, dimension, option_id, cast_at FROM votes WHERE event_id = $1 ORDER BY cast_at ASC"
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        let votes = vote_rows
            .into_iter()
            .map(VoteRow::into_vote)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(EventSnapshot {
            event,
            time_options,
            restaurant_options,
            participant_ids: participant_ids.into_iter().map(|(id,)| id).collect(),
            votes,
        }))
    }

    /// Replace an event's definition with a validated edit-wizard draft
    ///
    /// Options and participants are rewritten wholesale; votes referring to
    /// removed options or removed participants are dropped in the same
    /// transaction so no stale selection survives the edit.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event, PlanBuddyError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                voting_deadline = $4,
                time_option_type = $5,
                restaurant_option_type = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.voting_deadline)
        .bind(request.time_option_type.as_str())
        .bind(request.restaurant_option_type.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let event = row.into_event()?;

        sqlx::query("DELETE FROM event_participants WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM time_options WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM restaurant_options WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_participants(&mut tx, id, &request.participant_ids).await?;
        insert_time_options(&mut tx, id, &request.time_options).await?;
        insert_restaurant_options(&mut tx, id, &request.restaurant_options).await?;

        let surviving_options: Vec<Uuid> = request
            .time_options
            .iter()
            .map(|o| o.id)
            .chain(request.restaurant_options.iter().map(|o| o.id))
            .collect();
        sqlx::query("DELETE FROM votes WHERE event_id = $1 AND NOT (option_id = ANY($2))")
            .bind(id)
            .bind(&surviving_options)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM votes WHERE event_id = $1 AND NOT (user_id = ANY($2))")
            .bind(id)
            .bind(&request.participant_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(event)
    }

    /// Close voting by moving the deadline to "now"
    pub async fn close_voting(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Event, PlanBuddyError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET voting_deadline = $2, updated_at = $3
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(now)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.into_event()
    }

    /// Delete event
    pub async fn delete(&self, id: i64) -> Result<(), PlanBuddyError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get events a user participates in, soonest deadline first
    pub async fn get_user_events(&self, user_id: i64) -> Result<Vec<Event>, PlanBuddyError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT e.id, e.title, e.description, e.creator_id, e.voting_deadline, e.time_option_type, e.restaurant_option_type, e.created_at, e.updated_at
            FROM events e
            INNER JOIN event_participants ep ON e.id = ep.event_id
            WHERE ep.user_id = $1
            ORDER BY e.voting_deadline ASC NULLS LAST, e.id ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, PlanBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

async fn insert_participants(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: i64,
    participant_ids: &[i64],
) -> Result<(), PlanBuddyError> {
    for user_id in participant_ids {
        sqlx::query(
            "INSERT INTO event_participants (event_id, user_id, added_at) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING"
        )
        .bind(event_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_time_options(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: i64,
    options: &[NewTimeOption],
) -> Result<(), PlanBuddyError> {
    for (position, option) in options.iter().enumerate() {
        sqlx::query(
            "INSERT INTO time_options (id, event_id, position, start_time, end_time, max_capacity) VALUES ($1, $2, $3, $4, $5, $6)"
        )
        .bind(option.id)
        .bind(event_id)
        .bind(position as i32)
        .bind(option.start_time)
        .bind(option.end_time)
        .bind(option.max_capacity)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn insert_restaurant_options(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    event_id: i64,
    options: &[NewRestaurantOption],
) -> Result<(), PlanBuddyError> {
    for (position, option) in options.iter().enumerate() {
        sqlx::query(
            "INSERT INTO restaurant_options (id, event_id, position, name, menu_image_url, restaurant_url) VALUES ($1, $2, $3, $4, $5, $6)"
        )
        .bind(option.id)
        .bind(event_id)
        .bind(position as i32)
        .bind(&option.name)
        .bind(&option.menu_image_url)
        .bind(&option.restaurant_url)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
