//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod option;
pub mod vote;
pub mod validation;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, UpdateUserRequest};
pub use event::{
    Event, EventSnapshot, EventView, CreateEventRequest, UpdateEventRequest, NewTimeOption,
    NewRestaurantOption,
};
pub use option::{
    TimeOption, TimeOptionType, TimeOptionView, RestaurantOption, RestaurantOptionType,
    RestaurantOptionView, MAX_OPTIONS, MIN_OPTIONS,
};
pub use vote::{Vote, VoteDimension};
pub use validation::{FieldError, ValidationCode, ValidationErrors};
