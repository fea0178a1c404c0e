//! Event creation/edit wizard
//!
//! The multi-step wizard builds an `EventDraft` by threading an immutable
//! value through each step. Option list shaping, the silent 1/6 bounds and
//! the accumulated validation rules live here.

pub mod draft;
pub mod options;
pub mod validation;

pub use draft::{EventDraft, RestaurantOptionDraft, TimeOptionDraft};
pub use validation::validate_draft;
