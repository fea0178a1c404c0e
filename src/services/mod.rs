//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod user;
pub mod vote;

// Re-export commonly used services
pub use event::EventService;
pub use user::UserService;
pub use vote::VoteService;

use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub event_service: EventService,
    pub vote_service: VoteService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: &DatabaseService) -> Self {
        let user_service = UserService::new(database.users.clone());
        let event_service =
            EventService::new(database.events.clone(), database.users.clone());
        let vote_service = VoteService::new(
            database.events.clone(),
            database.votes.clone(),
            database.users.clone(),
        );

        Self {
            user_service,
            event_service,
            vote_service,
        }
    }
}
