//! User service implementation
//!
//! This service is the participant directory: it registers users and
//! resolves participant ids to display identities. The voting core itself
//! only ever stores and compares ids.

use tracing::{debug, info};
use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{PlanBuddyError, Result};

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Register a new user
    pub async fn register_user(&self, request: CreateUserRequest) -> Result<User> {
        if request.display_name.trim().is_empty() {
            return Err(PlanBuddyError::InvalidInput(
                "Display name is required".to_string(),
            ));
        }

        let user = self.user_repository.create(request).await?;
        info!(user_id = user.id, "New user registered successfully");
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        debug!(user_id = user_id, "Getting user by ID");
        self.user_repository.find_by_id(user_id).await
    }

    /// Resolve participant ids to display identities
    pub async fn resolve_participants(&self, ids: &[i64]) -> Result<Vec<User>> {
        debug!(count = ids.len(), "Resolving participants");
        self.user_repository.list_by_ids(ids).await
    }

    /// Update user profile
    pub async fn update_user_profile(
        &self,
        user_id: i64,
        update_request: UpdateUserRequest,
    ) -> Result<User> {
        debug!(user_id = user_id, "Updating user profile");

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(PlanBuddyError::UserNotFound { user_id })?;

        let user = self.user_repository.update(user_id, update_request).await?;
        info!(user_id = user_id, "User profile updated successfully");
        Ok(user)
    }
}
