//! Test data helpers for creating events, snapshots and ledgers
//!
//! All timestamps derive from a fixed base instant so tests are
//! deterministic and never depend on the wall clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use PlanBuddy::models::event::{Event, EventSnapshot};
use PlanBuddy::models::option::{
    RestaurantOption, RestaurantOptionType, TimeOption, TimeOptionType,
};
use PlanBuddy::models::vote::VoteDimension;
use PlanBuddy::voting::VoteLedger;

/// The event creator in all test fixtures
pub const CREATOR_ID: i64 = 1;

/// The full participant set in all test fixtures
pub const PARTICIPANTS: [i64; 5] = [1, 2, 3, 4, 5];

pub const EVENT_ID: i64 = 42;

/// Fixed "now" used by the fixtures
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Voting deadline one day after `base_time`
pub fn deadline() -> DateTime<Utc> {
    base_time() + Duration::hours(24)
}

pub fn make_time_option(position: i32, max_capacity: Option<i32>) -> TimeOption {
    let start = base_time() + Duration::days(7) + Duration::hours(position as i64);
    TimeOption {
        id: Uuid::new_v4(),
        event_id: EVENT_ID,
        position,
        start_time: start,
        end_time: start + Duration::hours(2),
        max_capacity,
    }
}

pub fn make_restaurant_option(position: i32, name: &str) -> RestaurantOption {
    RestaurantOption {
        id: Uuid::new_v4(),
        event_id: EVENT_ID,
        position,
        name: name.to_string(),
        menu_image_url: None,
        restaurant_url: None,
    }
}

fn make_event(
    time_option_type: TimeOptionType,
    restaurant_option_type: RestaurantOptionType,
    voting_deadline: Option<DateTime<Utc>>,
) -> Event {
    Event {
        id: EVENT_ID,
        title: "Team dinner".to_string(),
        description: Some("Monthly get-together".to_string()),
        creator_id: CREATOR_ID,
        voting_deadline,
        time_option_type,
        restaurant_option_type,
        created_at: base_time() - Duration::days(1),
        updated_at: base_time() - Duration::days(1),
    }
}

/// Event with a voting time dimension and no restaurant dimension
pub fn voting_time_event(option_count: usize) -> EventSnapshot {
    EventSnapshot {
        event: make_event(
            TimeOptionType::Voting,
            RestaurantOptionType::None,
            Some(deadline()),
        ),
        time_options: (0..option_count)
            .map(|i| make_time_option(i as i32, None))
            .collect(),
        restaurant_options: Vec::new(),
        participant_ids: PARTICIPANTS.to_vec(),
        votes: Vec::new(),
    }
}

/// Event with capacity-limited time slots
pub fn capacity_time_event(capacities: &[i32]) -> EventSnapshot {
    EventSnapshot {
        event: make_event(
            TimeOptionType::CapacityBased,
            RestaurantOptionType::None,
            Some(deadline()),
        ),
        time_options: capacities
            .iter()
            .enumerate()
            .map(|(i, capacity)| make_time_option(i as i32, Some(*capacity)))
            .collect(),
        restaurant_options: Vec::new(),
        participant_ids: PARTICIPANTS.to_vec(),
        votes: Vec::new(),
    }
}

/// Event voting on both dimensions
pub fn voting_both_event(time_count: usize, restaurant_count: usize) -> EventSnapshot {
    EventSnapshot {
        event: make_event(
            TimeOptionType::Voting,
            RestaurantOptionType::Voting,
            Some(deadline()),
        ),
        time_options: (0..time_count)
            .map(|i| make_time_option(i as i32, None))
            .collect(),
        restaurant_options: (0..restaurant_count)
            .map(|i| make_restaurant_option(i as i32, &format!("Place {}", i + 1)))
            .collect(),
        participant_ids: PARTICIPANTS.to_vec(),
        votes: Vec::new(),
    }
}

/// Fully fixed event: no voting anywhere, no deadline
pub fn fixed_event() -> EventSnapshot {
    EventSnapshot {
        event: make_event(TimeOptionType::Fixed, RestaurantOptionType::Fixed, None),
        time_options: vec![make_time_option(0, None)],
        restaurant_options: vec![make_restaurant_option(0, "Trattoria Da Mario")],
        participant_ids: PARTICIPANTS.to_vec(),
        votes: Vec::new(),
    }
}

/// Cast (or toggle) a time vote and apply it to the ledger
pub fn cast_time(
    ledger: &mut VoteLedger,
    snapshot: &EventSnapshot,
    user_id: i64,
    option_index: usize,
) {
    let option_id = snapshot.time_options[option_index].id;
    let outcome = ledger
        .cast_or_toggle(snapshot, user_id, VoteDimension::Time, option_id, base_time())
        .expect("time vote should be accepted");
    ledger.apply(
        snapshot.event.id,
        user_id,
        VoteDimension::Time,
        outcome,
        base_time(),
    );
}

/// Cast (or toggle) a restaurant vote and apply it to the ledger
pub fn cast_restaurant(
    ledger: &mut VoteLedger,
    snapshot: &EventSnapshot,
    user_id: i64,
    option_index: usize,
) {
    let option_id = snapshot.restaurant_options[option_index].id;
    let outcome = ledger
        .cast_or_toggle(
            snapshot,
            user_id,
            VoteDimension::Restaurant,
            option_id,
            base_time(),
        )
        .expect("restaurant vote should be accepted");
    ledger.apply(
        snapshot.event.id,
        user_id,
        VoteDimension::Restaurant,
        outcome,
        base_time(),
    );
}
