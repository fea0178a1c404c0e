//! Voting resolution
//!
//! Winners are computed lazily from the frozen vote set whenever the event
//! is read after its deadline; there is no stored "closed" flag and no
//! stored result. Recomputing over the same votes always yields the same
//! winner.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::event::EventSnapshot;
use crate::models::option::{RestaurantOptionType, TimeOptionType};
use crate::models::vote::VoteDimension;
use super::ledger::VoteLedger;

/// Whether the voting deadline has passed
///
/// An event without a deadline (fully fixed configuration) never closes;
/// its dimensions reject votes through `NotVotable` instead.
pub fn is_voting_closed(snapshot: &EventSnapshot, now: DateTime<Utc>) -> bool {
    snapshot
        .event
        .voting_deadline
        .map(|deadline| now >= deadline)
        .unwrap_or(false)
}

/// Winner of the time dimension
///
/// A fixed dimension resolves to its sole option; otherwise the option with
/// the most votes wins, ties broken in favor of the creator's own pick when
/// the creator voted for a tied option, else the first tied option in list
/// order.
pub fn winning_time_option(snapshot: &EventSnapshot, ledger: &VoteLedger) -> Option<Uuid> {
    let option_ids: Vec<Uuid> = snapshot.time_options.iter().map(|o| o.id).collect();
    if snapshot.event.time_option_type == TimeOptionType::Fixed {
        return option_ids.first().copied();
    }
    winner_by_votes(
        &option_ids,
        VoteDimension::Time,
        ledger,
        snapshot.event.creator_id,
    )
}

/// Winner of the restaurant dimension; `None` mode has no result
pub fn winning_restaurant_option(snapshot: &EventSnapshot, ledger: &VoteLedger) -> Option<Uuid> {
    match snapshot.event.restaurant_option_type {
        RestaurantOptionType::None => None,
        RestaurantOptionType::Fixed => snapshot.restaurant_options.first().map(|o| o.id),
        RestaurantOptionType::Voting => winner_by_votes(
            &snapshot
                .restaurant_options
                .iter()
                .map(|o| o.id)
                .collect::<Vec<_>>(),
            VoteDimension::Restaurant,
            ledger,
            snapshot.event.creator_id,
        ),
    }
}

fn winner_by_votes(
    option_ids: &[Uuid],
    dimension: VoteDimension,
    ledger: &VoteLedger,
    creator_id: i64,
) -> Option<Uuid> {
    let max_votes = option_ids
        .iter()
        .map(|id| ledger.votes_count(dimension, *id))
        .max()?;
    let tied: Vec<Uuid> = option_ids
        .iter()
        .copied()
        .filter(|id| ledger.votes_count(dimension, *id) == max_votes)
        .collect();

    if let Some(creator_pick) = ledger.selection(creator_id, dimension) {
        if tied.contains(&creator_pick) {
            return Some(creator_pick);
        }
    }
    tied.first().copied()
}

/// Whether the viewer may close voting early
///
/// Only the creator may close, only while voting is still open, and only
/// once their own selection is in place for every dimension the event
/// requires voting for.
pub fn can_close_voting(
    snapshot: &EventSnapshot,
    ledger: &VoteLedger,
    viewer_id: i64,
    now: DateTime<Utc>,
) -> bool {
    let event = &snapshot.event;
    if viewer_id != event.creator_id {
        return false;
    }
    if !event.requires_voting() || is_voting_closed(snapshot, now) {
        return false;
    }
    if event.time_option_type.requires_voting()
        && ledger.selection(viewer_id, VoteDimension::Time).is_none()
    {
        return false;
    }
    if event.restaurant_option_type.requires_voting()
        && ledger
            .selection(viewer_id, VoteDimension::Restaurant)
            .is_none()
    {
        return false;
    }
    true
}
