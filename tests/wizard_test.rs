//! Wizard draft tests: mode transitions, option bounds and collected
//! validation

mod helpers;

use helpers::{base_time, voting_time_event};
use PlanBuddy::models::option::{RestaurantOptionType, TimeOptionType, MAX_OPTIONS};
use PlanBuddy::models::validation::ValidationCode;
use PlanBuddy::utils::time::format_minute;
use PlanBuddy::wizard::EventDraft;
use chrono::Duration;

fn future(hours: i64) -> String {
    format_minute(base_time() + Duration::hours(hours))
}

#[test]
fn new_draft_starts_fixed_with_one_blank_slot() {
    let draft = EventDraft::new(1);
    assert_eq!(draft.time_option_type, TimeOptionType::Fixed);
    assert_eq!(draft.time_options.len(), 1);
    assert_eq!(draft.restaurant_option_type, RestaurantOptionType::None);
    assert!(draft.restaurant_options.is_empty());
    assert!(draft.participant_ids.contains(&1));
}

#[test]
fn add_option_is_a_no_op_beyond_six() {
    let mut draft = EventDraft::new(1).set_time_mode(TimeOptionType::Voting);
    for _ in 0..10 {
        draft = draft.add_time_option();
    }
    assert_eq!(draft.time_options.len(), MAX_OPTIONS);
}

#[test]
fn remove_option_keeps_the_last_one() {
    let draft = EventDraft::new(1).set_time_mode(TimeOptionType::Voting);
    let only = draft.time_options[0].id;
    let draft = draft.remove_time_option(only);
    assert_eq!(draft.time_options.len(), 1);
    assert_eq!(draft.time_options[0].id, only);
}

#[test]
fn switching_voting_to_capacity_keeps_entered_slots() {
    let draft = EventDraft::new(1)
        .set_time_mode(TimeOptionType::Voting)
        .add_time_option();
    let ids: Vec<_> = draft.time_options.iter().map(|o| o.id).collect();

    let draft = draft.set_time_mode(TimeOptionType::CapacityBased);
    assert_eq!(
        draft.time_options.iter().map(|o| o.id).collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn switching_fixed_to_voting_resets_the_list() {
    let draft = EventDraft::new(1);
    let old = draft.time_options[0].id;
    let draft = draft.set_time_mode(TimeOptionType::Voting);
    assert_eq!(draft.time_options.len(), 1);
    assert_ne!(draft.time_options[0].id, old);
}

#[test]
fn restaurant_none_keeps_an_empty_list() {
    let draft = EventDraft::new(1)
        .set_restaurant_mode(RestaurantOptionType::Voting)
        .add_restaurant_option()
        .set_restaurant_mode(RestaurantOptionType::None);
    assert!(draft.restaurant_options.is_empty());

    // removing from the empty list stays a no-op
    let draft = draft.remove_restaurant_option(uuid::Uuid::new_v4());
    assert!(draft.restaurant_options.is_empty());
}

#[test]
fn deadline_is_cleared_when_no_dimension_votes_anymore() {
    let draft = EventDraft::new(1)
        .set_time_mode(TimeOptionType::Voting)
        .with_voting_deadline(future(24));
    assert!(!draft.voting_deadline.is_empty());

    let draft = draft.set_time_mode(TimeOptionType::Fixed);
    assert!(draft.voting_deadline.is_empty());
}

#[test]
fn creator_cannot_be_removed_from_participants() {
    let draft = EventDraft::new(1).add_participant(2).remove_participant(1);
    assert!(draft.participant_ids.contains(&1));
    assert!(draft.participant_ids.contains(&2));
}

#[test]
fn validation_collects_every_problem_at_once() {
    // Voting time mode with one untouched blank option: title, deadline,
    // cardinality and both timestamp fields are all reported together.
    let draft = EventDraft::new(1).set_time_mode(TimeOptionType::Voting);
    let errors = draft.validate(base_time());

    assert!(errors.has_errors());
    assert!(errors.has_event_error("title"));
    assert!(errors.has_event_error("voting_deadline"));
    assert!(errors
        .event
        .iter()
        .any(|e| e.field == "time_options" && e.code == ValidationCode::TooFewOptions));

    let option_id = draft.time_options[0].id;
    let option_errors = &errors.time_options[&option_id];
    assert!(option_errors
        .iter()
        .any(|e| e.field == "start_time" && e.code == ValidationCode::Required));
    assert!(option_errors
        .iter()
        .any(|e| e.field == "end_time" && e.code == ValidationCode::Required));
}

#[test]
fn end_must_be_strictly_after_start() {
    let draft = EventDraft::new(1).with_title("Dinner");
    let option_id = draft.time_options[0].id;
    let draft = draft
        .set_time_option_start(option_id, future(24))
        .set_time_option_end(option_id, future(24));

    let errors = draft.validate(base_time());
    assert!(errors.time_options[&option_id]
        .iter()
        .any(|e| e.field == "end_time" && e.code == ValidationCode::EndBeforeStart));
}

#[test]
fn past_deadline_is_rejected() {
    let draft = EventDraft::new(1)
        .with_title("Dinner")
        .set_time_mode(TimeOptionType::Voting)
        .with_voting_deadline(format_minute(base_time() - Duration::hours(1)));

    let errors = draft.validate(base_time());
    assert!(errors
        .event
        .iter()
        .any(|e| e.field == "voting_deadline" && e.code == ValidationCode::InPast));
}

#[test]
fn capacity_is_required_per_slot_under_capacity_mode() {
    let mut draft = EventDraft::new(1)
        .with_title("Dinner")
        .set_time_mode(TimeOptionType::CapacityBased)
        .add_time_option()
        .with_voting_deadline(future(24));
    let ids: Vec<_> = draft.time_options.iter().map(|o| o.id).collect();
    for (i, id) in ids.iter().enumerate() {
        draft = draft
            .set_time_option_start(*id, future(48 + i as i64))
            .set_time_option_end(*id, future(50 + i as i64));
    }
    draft = draft.set_time_option_capacity(ids[0], "4");

    let errors = draft.validate(base_time());
    assert!(!errors.time_options.contains_key(&ids[0]));
    assert!(errors.time_options[&ids[1]]
        .iter()
        .any(|e| e.field == "max_capacity" && e.code == ValidationCode::Required));
}

#[test]
fn zero_capacity_is_out_of_range() {
    let draft = EventDraft::new(1).set_time_mode(TimeOptionType::CapacityBased);
    let id = draft.time_options[0].id;
    let draft = draft.set_time_option_capacity(id, "0");

    let errors = draft.validate(base_time());
    assert!(errors.time_options[&id]
        .iter()
        .any(|e| e.field == "max_capacity" && e.code == ValidationCode::OutOfRange));
}

#[test]
fn single_restaurant_option_fails_voting_cardinality() {
    // Scenario: restaurant voting enabled but only one restaurant entered
    let draft = EventDraft::new(1)
        .with_title("Dinner")
        .set_restaurant_mode(RestaurantOptionType::Voting)
        .with_voting_deadline(future(24));
    let time_id = draft.time_options[0].id;
    let restaurant_id = draft.restaurant_options[0].id;
    let draft = draft
        .set_time_option_start(time_id, future(48))
        .set_time_option_end(time_id, future(50))
        .set_restaurant_option_name(restaurant_id, "Golden Dragon");

    let result = draft.into_create_request(base_time());
    let errors = result.expect_err("draft must be rejected");
    assert!(errors
        .event
        .iter()
        .any(|e| e.field == "restaurant_options" && e.code == ValidationCode::TooFewOptions));
}

#[test]
fn valid_draft_converts_into_a_create_request() {
    let mut draft = EventDraft::new(1)
        .with_title("  Team dinner  ")
        .with_description("")
        .add_participant(2)
        .add_participant(3)
        .set_time_mode(TimeOptionType::Voting)
        .add_time_option()
        .with_voting_deadline(future(24));
    let ids: Vec<_> = draft.time_options.iter().map(|o| o.id).collect();
    for (i, id) in ids.iter().enumerate() {
        draft = draft
            .set_time_option_start(*id, future(48 + 3 * i as i64))
            .set_time_option_end(*id, future(49 + 3 * i as i64));
    }

    let request = draft
        .into_create_request(base_time())
        .expect("draft should be valid");

    assert_eq!(request.title, "Team dinner");
    assert_eq!(request.description, None);
    assert_eq!(request.creator_id, 1);
    assert_eq!(request.participant_ids, vec![1, 2, 3]);
    assert!(request.voting_deadline.is_some());
    assert_eq!(request.time_options.len(), 2);
    assert_eq!(
        request.time_options.iter().map(|o| o.id).collect::<Vec<_>>(),
        ids
    );
    assert!(request.restaurant_options.is_empty());
}

#[test]
fn edit_wizard_prefills_from_a_snapshot() {
    let snapshot = voting_time_event(3);
    let draft = EventDraft::from_snapshot(&snapshot);

    assert_eq!(draft.title, snapshot.event.title);
    assert_eq!(draft.creator_id, snapshot.event.creator_id);
    assert_eq!(draft.time_option_type, TimeOptionType::Voting);
    assert_eq!(draft.time_options.len(), 3);
    assert_eq!(
        draft.time_options[0].start_time,
        format_minute(snapshot.time_options[0].start_time)
    );
    assert_eq!(
        draft.voting_deadline,
        format_minute(snapshot.event.voting_deadline.unwrap())
    );

    // a prefilled draft round-trips through validation unchanged
    let request = draft
        .into_create_request(base_time())
        .expect("prefilled draft should still be valid");
    assert_eq!(
        request.time_options.iter().map(|o| o.id).collect::<Vec<_>>(),
        snapshot.time_options.iter().map(|o| o.id).collect::<Vec<_>>()
    );
}

#[test]
fn fully_fixed_draft_persists_without_a_deadline() {
    let draft = EventDraft::new(1).with_title("Dinner");
    let id = draft.time_options[0].id;
    let draft = draft
        .set_time_option_start(id, future(48))
        .set_time_option_end(id, future(50))
        // a leftover deadline from an earlier wizard step is not persisted
        .with_voting_deadline(future(24))
        .set_time_mode(TimeOptionType::Fixed);

    let request = draft
        .into_create_request(base_time())
        .expect("draft should be valid");
    assert_eq!(request.voting_deadline, None);
}
