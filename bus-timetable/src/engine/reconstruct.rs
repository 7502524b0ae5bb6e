//! Stop-sequence reconstruction from an origin-destination matrix.
//!
//! The source table records many stop pairings per trip, not just adjacent
//! stops: a trip calling at S1..S9 may have rows S1->S5, S3->S9 and S1->S2.
//! Chaining arrivals to departures loses every stop that only appears inside
//! a longer pairing. Instead, every (stop, time) on either side of every row
//! is collected, the earliest time per stop is kept, and the stops are
//! ordered by time.

use std::collections::HashMap;

use crate::config::MidnightPolicy;
use crate::domain::{ClockTime, MINUTES_PER_DAY, StopName, StopVisit, TripSequence};
use crate::table::LegObservation;

/// Reconstruct the itinerary of one trip-group.
///
/// Returns `None` when fewer than two distinct stops have a usable time;
/// partial coverage of the matrix is expected and is not an error.
///
/// # Examples
///
/// ```
/// use bus_timetable::config::MidnightPolicy;
/// use bus_timetable::engine::reconstruct;
/// use bus_timetable::table::LegObservation;
///
/// let legs = vec![
///     LegObservation::between("S1", "08:00", "S3", "08:20"),
///     LegObservation::between("S1", "08:00", "S2", "08:10"),
///     LegObservation::between("S3", "08:20", "S5", "08:40"),
/// ];
///
/// let trip = reconstruct(&legs, &MidnightPolicy::default()).unwrap();
/// let stops: Vec<_> = trip.stops().map(|s| s.as_str()).collect();
/// assert_eq!(stops, ["S1", "S2", "S3", "S5"]);
/// ```
pub fn reconstruct(legs: &[LegObservation], policy: &MidnightPolicy) -> Option<TripSequence> {
    let mut visits: Vec<StopVisit> = earliest_calls(legs)
        .into_iter()
        .map(|(stop, clock)| StopVisit::new(stop, clock))
        .collect();

    if visits.len() < 2 {
        return None;
    }

    apply_midnight_correction(&mut visits, policy);

    visits.sort_by(|a, b| {
        a.minute_offset
            .cmp(&b.minute_offset)
            .then_with(|| a.stop.cmp(&b.stop))
    });

    TripSequence::new(visits).ok()
}

/// Earliest observed time for every stop in the group.
///
/// Later observations of the same stop are redundant reports of the same
/// call (e.g. the departure time repeated on every row leaving that stop).
fn earliest_calls(legs: &[LegObservation]) -> HashMap<StopName, ClockTime> {
    let mut earliest: HashMap<StopName, ClockTime> = HashMap::new();

    for (stop, clock) in legs.iter().flat_map(observed_calls) {
        earliest
            .entry(stop)
            .and_modify(|t| {
                if clock < *t {
                    *t = clock;
                }
            })
            .or_insert(clock);
    }

    earliest
}

/// The usable calls in one row: its departure side and its arrival side,
/// each read independently.
fn observed_calls(leg: &LegObservation) -> impl Iterator<Item = (StopName, ClockTime)> {
    let departure = read_call(leg.departure_stop.as_deref(), leg.departure_time.as_deref());
    let arrival = read_call(leg.arrival_stop.as_deref(), leg.arrival_time.as_deref());
    departure.into_iter().chain(arrival)
}

fn read_call(stop: Option<&str>, time: Option<&str>) -> Option<(StopName, ClockTime)> {
    Some((StopName::parse(stop?)?, ClockTime::parse(time?)?))
}

/// Move early-morning calls to the next day when the trip also has
/// late-evening calls.
///
/// A trip with calls both before `early_before` and at or after `late_from`
/// started the previous evening, so its early calls get 1440 minutes added.
/// Returns true if any offset was changed.
pub fn apply_midnight_correction(visits: &mut [StopVisit], policy: &MidnightPolicy) -> bool {
    let is_early = |v: &StopVisit| v.clock.minute_of_day() < policy.early_before;
    let is_late = |v: &StopVisit| v.clock.minute_of_day() >= policy.late_from;

    if !(visits.iter().any(is_early) && visits.iter().any(is_late)) {
        return false;
    }

    for visit in visits.iter_mut().filter(|v| is_early(v)) {
        visit.minute_offset = visit.clock.minute_of_day() + MINUTES_PER_DAY;
    }
    true
}
