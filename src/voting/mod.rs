//! Voting core
//!
//! The vote ledger (single selection per user and dimension, toggle
//! semantics, capacity ceilings) and the resolution engine (deadline checks,
//! winner computation, close preconditions). Everything here is pure; the
//! persistence gateway commits the outcomes.

pub mod ledger;
pub mod resolution;

pub use ledger::{VoteLedger, VoteOutcome};
pub use resolution::{
    can_close_voting, is_voting_closed, winning_restaurant_option, winning_time_option,
};
