//! Validation error structures
//!
//! Field-level validation failures are accumulated into a single structure,
//! keyed by option id where applicable, so the caller can render every
//! outstanding problem at once instead of only the first one found.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Machine-readable validation failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    Required,
    InvalidFormat,
    InPast,
    EndBeforeStart,
    TooFewOptions,
    TooManyOptions,
    OutOfRange,
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: ValidationCode,
}

impl FieldError {
    pub fn new(field: &str, code: ValidationCode) -> Self {
        Self {
            field: field.to_string(),
            code,
        }
    }
}

/// Accumulated validation failures for an event draft
///
/// Event-level failures (title, participants, deadline, option-list
/// cardinality) live in `event`; per-option failures are keyed by the
/// option's draft id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub event: Vec<FieldError>,
    pub time_options: BTreeMap<Uuid, Vec<FieldError>>,
    pub restaurant_options: BTreeMap<Uuid, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event-level failure
    pub fn push_event(&mut self, field: &str, code: ValidationCode) {
        self.event.push(FieldError::new(field, code));
    }

    /// Record a failure on a specific time option
    pub fn push_time_option(&mut self, option_id: Uuid, field: &str, code: ValidationCode) {
        self.time_options
            .entry(option_id)
            .or_default()
            .push(FieldError::new(field, code));
    }

    /// Record a failure on a specific restaurant option
    pub fn push_restaurant_option(&mut self, option_id: Uuid, field: &str, code: ValidationCode) {
        self.restaurant_options
            .entry(option_id)
            .or_default()
            .push(FieldError::new(field, code));
    }

    /// Whether any failure has been recorded
    pub fn has_errors(&self) -> bool {
        !self.event.is_empty()
            || !self.time_options.is_empty()
            || !self.restaurant_options.is_empty()
    }

    /// Total number of recorded failures
    pub fn len(&self) -> usize {
        self.event.len()
            + self.time_options.values().map(Vec::len).sum::<usize>()
            + self.restaurant_options.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }

    /// Whether a specific event-level field failed
    pub fn has_event_error(&self, field: &str) -> bool {
        self.event.iter().any(|e| e.field == field)
    }
}
