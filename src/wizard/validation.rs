//! Draft validation
//!
//! All checks run over the whole draft and accumulate their findings; the
//! wizard renders every violation at once, so nothing here is fail-fast.

use chrono::{DateTime, Utc};

use crate::models::event::{
    CreateEventRequest, NewRestaurantOption, NewTimeOption, UpdateEventRequest,
};
use crate::models::option::{RestaurantOptionType, TimeOptionType, MAX_OPTIONS};
use crate::models::validation::{ValidationCode, ValidationErrors};
use crate::utils::time::{parse_timestamp, validate_not_past, validate_order};
use super::draft::{EventDraft, TimeOptionDraft};

/// Validate the whole draft, collecting every outstanding problem
pub fn validate_draft(draft: &EventDraft, now: DateTime<Utc>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if draft.title.trim().is_empty() {
        errors.push_event("title", ValidationCode::Required);
    }
    if draft.participant_ids.is_empty() {
        errors.push_event("participant_ids", ValidationCode::Required);
    }

    validate_time_dimension(draft, now, &mut errors);
    validate_restaurant_dimension(draft, &mut errors);

    if draft.requires_voting_deadline() {
        if let Err(code) = validate_not_past(Some(&draft.voting_deadline), now) {
            errors.push_event("voting_deadline", code);
        }
    }

    errors
}

fn validate_time_dimension(draft: &EventDraft, now: DateTime<Utc>, errors: &mut ValidationErrors) {
    check_cardinality(
        draft.time_options.len(),
        draft.time_option_type.is_multi_option(),
        "time_options",
        errors,
    );

    let capacity_required = draft.time_option_type == TimeOptionType::CapacityBased;
    for option in &draft.time_options {
        validate_time_option(option, capacity_required, now, errors);
    }
}

fn validate_time_option(
    option: &TimeOptionDraft,
    capacity_required: bool,
    now: DateTime<Utc>,
    errors: &mut ValidationErrors,
) {
    let start = match validate_not_past(Some(&option.start_time), now) {
        Ok(value) => Some(value),
        Err(code) => {
            errors.push_time_option(option.id, "start_time", code);
            None
        }
    };

    let end_raw = option.end_time.trim();
    let end = if end_raw.is_empty() {
        errors.push_time_option(option.id, "end_time", ValidationCode::Required);
        None
    } else {
        match parse_timestamp(end_raw) {
            Ok(value) => Some(value),
            Err(code) => {
                errors.push_time_option(option.id, "end_time", code);
                None
            }
        }
    };

    if let (Some(start), Some(end)) = (start, end) {
        if let Err(code) = validate_order(start, end) {
            errors.push_time_option(option.id, "end_time", code);
        }
    }

    if capacity_required {
        let raw = option.max_capacity.trim();
        if raw.is_empty() {
            errors.push_time_option(option.id, "max_capacity", ValidationCode::Required);
        } else {
            match raw.parse::<i32>() {
                Err(_) => {
                    errors.push_time_option(option.id, "max_capacity", ValidationCode::InvalidFormat)
                }
                Ok(capacity) if capacity < 1 => {
                    errors.push_time_option(option.id, "max_capacity", ValidationCode::OutOfRange)
                }
                Ok(_) => {}
            }
        }
    }
}

fn validate_restaurant_dimension(draft: &EventDraft, errors: &mut ValidationErrors) {
    if draft.restaurant_option_type == RestaurantOptionType::None {
        if !draft.restaurant_options.is_empty() {
            errors.push_event("restaurant_options", ValidationCode::TooManyOptions);
        }
        return;
    }

    check_cardinality(
        draft.restaurant_options.len(),
        draft.restaurant_option_type.is_multi_option(),
        "restaurant_options",
        errors,
    );

    for option in &draft.restaurant_options {
        if option.name.trim().is_empty() {
            errors.push_restaurant_option(option.id, "name", ValidationCode::Required);
        }
    }
}

fn check_cardinality(len: usize, multi_option: bool, field: &str, errors: &mut ValidationErrors) {
    let (min, max) = if multi_option { (2, MAX_OPTIONS) } else { (1, 1) };
    if len < min {
        errors.push_event(field, ValidationCode::TooFewOptions);
    } else if len > max {
        errors.push_event(field, ValidationCode::TooManyOptions);
    }
}

fn single_event_error(field: &str, code: ValidationCode) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push_event(field, code);
    errors
}

// Parsed field values shared by the create and update conversions.
struct DraftParts {
    voting_deadline: Option<DateTime<Utc>>,
    participant_ids: Vec<i64>,
    time_options: Vec<NewTimeOption>,
    restaurant_options: Vec<NewRestaurantOption>,
}

fn build_parts(
    draft: &EventDraft,
    now: DateTime<Utc>,
) -> std::result::Result<DraftParts, ValidationErrors> {
    let errors = validate_draft(draft, now);
    if errors.has_errors() {
        return Err(errors);
    }

    // Validation passed, so parsing can only fail on a logic mismatch
    // between the validator and this conversion; surface it as the same
    // structured error rather than panicking.
    let voting_deadline = if draft.requires_voting_deadline() {
        Some(
            parse_timestamp(&draft.voting_deadline)
                .map_err(|code| single_event_error("voting_deadline", code))?,
        )
    } else {
        None
    };

    let capacity_based = draft.time_option_type == TimeOptionType::CapacityBased;
    let mut time_options = Vec::with_capacity(draft.time_options.len());
    for option in &draft.time_options {
        let start_time = parse_timestamp(&option.start_time)
            .map_err(|code| single_event_error("time_options", code))?;
        let end_time = parse_timestamp(&option.end_time)
            .map_err(|code| single_event_error("time_options", code))?;
        let max_capacity = if capacity_based {
            Some(
                option
                    .max_capacity
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| single_event_error("time_options", ValidationCode::InvalidFormat))?,
            )
        } else {
            None
        };
        time_options.push(NewTimeOption {
            id: option.id,
            start_time,
            end_time,
            max_capacity,
        });
    }

    let restaurant_options = draft
        .restaurant_options
        .iter()
        .map(|option| NewRestaurantOption {
            id: option.id,
            name: option.name.trim().to_string(),
            menu_image_url: non_empty(&option.menu_image_url),
            restaurant_url: non_empty(&option.restaurant_url),
        })
        .collect();

    let mut participant_ids: Vec<i64> = draft.participant_ids.iter().copied().collect();
    if !participant_ids.contains(&draft.creator_id) {
        participant_ids.push(draft.creator_id);
    }

    Ok(DraftParts {
        voting_deadline,
        participant_ids,
        time_options,
        restaurant_options,
    })
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn build_create_request(
    draft: EventDraft,
    now: DateTime<Utc>,
) -> std::result::Result<CreateEventRequest, ValidationErrors> {
    let parts = build_parts(&draft, now)?;
    Ok(CreateEventRequest {
        title: draft.title.trim().to_string(),
        description: non_empty(&draft.description),
        creator_id: draft.creator_id,
        participant_ids: parts.participant_ids,
        voting_deadline: parts.voting_deadline,
        time_option_type: draft.time_option_type,
        time_options: parts.time_options,
        restaurant_option_type: draft.restaurant_option_type,
        restaurant_options: parts.restaurant_options,
    })
}

pub(crate) fn build_update_request(
    draft: EventDraft,
    now: DateTime<Utc>,
) -> std::result::Result<UpdateEventRequest, ValidationErrors> {
    let parts = build_parts(&draft, now)?;
    Ok(UpdateEventRequest {
        title: draft.title.trim().to_string(),
        description: non_empty(&draft.description),
        participant_ids: parts.participant_ids,
        voting_deadline: parts.voting_deadline,
        time_option_type: draft.time_option_type,
        time_options: parts.time_options,
        restaurant_option_type: draft.restaurant_option_type,
        restaurant_options: parts.restaurant_options,
    })
}
