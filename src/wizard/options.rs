//! Option list shaping rules
//!
//! Mode transitions reset or carry over the option list so the dimension
//! always satisfies its cardinality invariants, and the add/remove bounds at
//! 6 and 1 are silent no-ops rather than reported errors, mirroring buttons
//! that disable themselves.

use crate::models::option::{RestaurantOptionType, TimeOptionType, MAX_OPTIONS, MIN_OPTIONS};
use super::draft::{RestaurantOptionDraft, TimeOptionDraft};

/// Append a blank option unless the list is already at the ceiling
pub(crate) fn push_bounded<T>(mut options: Vec<T>, blank: T) -> Vec<T> {
    if options.len() < MAX_OPTIONS {
        options.push(blank);
    }
    options
}

/// Remove the matching option unless the list is already at the floor
///
/// Unknown ids are ignored.
pub(crate) fn remove_bounded<T>(mut options: Vec<T>, matches: impl Fn(&T) -> bool) -> Vec<T> {
    if options.len() > MIN_OPTIONS {
        if let Some(index) = options.iter().position(matches) {
            options.remove(index);
        }
    }
    options
}

/// Reshape the time option list for a mode transition
///
/// Switching between the two multi-option modes keeps the entered slots
/// (capacities then need to be filled in); every other transition starts
/// over with a single blank option.
pub(crate) fn reshape_time(
    options: Vec<TimeOptionDraft>,
    from: TimeOptionType,
    to: TimeOptionType,
) -> Vec<TimeOptionDraft> {
    if from == to {
        return options;
    }
    if from.is_multi_option() && to.is_multi_option() {
        return options;
    }
    vec![TimeOptionDraft::blank()]
}

/// Reshape the restaurant option list for a mode transition
pub(crate) fn reshape_restaurant(
    options: Vec<RestaurantOptionDraft>,
    from: RestaurantOptionType,
    to: RestaurantOptionType,
) -> Vec<RestaurantOptionDraft> {
    if from == to {
        return options;
    }
    match to {
        RestaurantOptionType::None => Vec::new(),
        _ => vec![RestaurantOptionDraft::blank()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_stops_silently_at_the_ceiling() {
        let mut options = vec![0u8];
        for value in 1..10u8 {
            options = push_bounded(options, value);
        }
        assert_eq!(options.len(), MAX_OPTIONS);
    }

    #[test]
    fn remove_keeps_the_last_option() {
        let options = remove_bounded(vec![7u8], |v| *v == 7);
        assert_eq!(options, vec![7]);
    }

    #[test]
    fn voting_to_capacity_keeps_entered_slots() {
        let drafts = vec![TimeOptionDraft::blank(), TimeOptionDraft::blank()];
        let ids: Vec<_> = drafts.iter().map(|d| d.id).collect();
        let reshaped = reshape_time(drafts, TimeOptionType::Voting, TimeOptionType::CapacityBased);
        assert_eq!(reshaped.iter().map(|d| d.id).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn fixed_to_voting_starts_over() {
        let drafts = vec![TimeOptionDraft::blank()];
        let old_id = drafts[0].id;
        let reshaped = reshape_time(drafts, TimeOptionType::Fixed, TimeOptionType::Voting);
        assert_eq!(reshaped.len(), 1);
        assert_ne!(reshaped[0].id, old_id);
    }

    #[test]
    fn restaurant_none_clears_the_list() {
        let drafts = vec![RestaurantOptionDraft::blank(), RestaurantOptionDraft::blank()];
        let reshaped =
            reshape_restaurant(drafts, RestaurantOptionType::Voting, RestaurantOptionType::None);
        assert!(reshaped.is_empty());
    }
}
