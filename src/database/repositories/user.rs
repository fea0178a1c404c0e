//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, CreateUserRequest, UpdateUserRequest};
use crate::utils::errors::PlanBuddyError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, PlanBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (display_name, email, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, display_name, email, avatar_url, created_at, updated_at
            "#
        )
        .bind(request.display_name)
        .bind(request.email)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, PlanBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, display_name, email, avatar_url, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Resolve a set of user ids to display identities
    pub async fn list_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, PlanBuddyError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = sqlx::query_as::<_, User>(
            "SELECT id, display_name, email, avatar_url, created_at, updated_at FROM users WHERE id = ANY($1) ORDER BY id"
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Update user profile
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, PlanBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET display_name = COALESCE($2, display_name),
                email = COALESCE($3, email),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = $5
            WHERE id = $1
            RETURNING id, display_name, email, avatar_url, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.display_name)
        .bind(request.email)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, PlanBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
