//! Timetable construction.
//!
//! Each trip-group of the leg table goes through the same pipeline:
//!
//! 1. classify the day descriptor into a bucket
//! 2. reconstruct the stop sequence from the leg matrix
//! 3. classify the line variant
//! 4. resolve the direction and route into sections
//!
//! Groups that fail a step are omitted and counted; nothing here is fatal.

mod aggregate;
mod classify;
mod reconstruct;
mod route;


pub use aggregate::{PlacedTrip, Timetable};
pub use classify::{classify_variant, declared_variant};
pub use reconstruct::{apply_midnight_correction, reconstruct};
pub use route::{BranchSlice, Placement, Routing, branch_slice, route_trip};

use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::domain::{DayClass, TripEntry, TripId, classify_day};
use crate::table::TripGroup;

/// What happened to one trip-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// One or two entries were produced.
    Placed {
        trips: Vec<PlacedTrip>,
        /// Branch ends were found in the wrong order; branch entry omitted.
        needs_review: bool,
        /// The declared variant was overridden by stop membership.
        reclassified: bool,
    },
    /// The day descriptor matched no bucket.
    UnrecognizedDay(String),
    /// Fewer than two stops with a usable time.
    TooFewStops,
    /// The direction text matched neither direction label.
    Unroutable(Option<String>),
}

/// Build the timetable entries for one trip-group.
pub fn build_entries(group: &TripGroup, config: &NetworkConfig) -> GroupOutcome {
    let key = &group.key;
    let trip_id = TripId::parse(key.trip_key.as_deref().unwrap_or_default());

    let day = match classify_day(key.day.as_deref().unwrap_or_default(), &config.days) {
        DayClass::Bucket(bucket) => bucket,
        DayClass::Unrecognized(text) => {
            debug!(trip = %trip_id, day = %text, "skipping group with unrecognized day");
            return GroupOutcome::UnrecognizedDay(text);
        }
    };

    let Some(sequence) = reconstruct(&group.legs, &config.midnight) else {
        debug!(trip = %trip_id, legs = group.legs.len(), "skipping group with fewer than two stops");
        return GroupOutcome::TooFewStops;
    };

    let hint = key.line_variant_hint.as_deref();
    let variant = classify_variant(&sequence, hint, &config.variants, &config.places);
    let reclassified = variant != declared_variant(hint, &config.variants);
    if reclassified {
        debug!(trip = %trip_id, ?variant, "declared variant overridden by stop membership");
    }

    let Some(direction) = key.direction.as_deref().and_then(|d| config.directions.parse(d)) else {
        debug!(trip = %trip_id, direction = ?key.direction, "skipping group with unknown direction");
        return GroupOutcome::Unroutable(key.direction.clone());
    };

    let routing = route_trip(&sequence, direction, variant, &config.places);
    if routing.needs_review {
        warn!(
            trip = %trip_id,
            ?direction,
            day = ?day,
            "branch stops out of order for direction, branch entry omitted"
        );
    }

    let trips = std::iter::once(routing.primary)
        .chain(routing.branch)
        .map(|placement| PlacedTrip {
            section: placement.section,
            day,
            variant: placement.variant,
            entry: TripEntry::new(trip_id.clone(), placement.sequence),
        })
        .collect();

    GroupOutcome::Placed {
        trips,
        needs_review: routing.needs_review,
        reclassified,
    }
}

/// Counters for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub groups: usize,
    pub placed_groups: usize,
    pub entries: usize,
    pub branch_entries: usize,
    pub unrecognized_day: usize,
    pub too_few_stops: usize,
    pub unroutable: usize,
    pub needs_review: usize,
    pub reclassified: usize,
}

impl BuildStats {
    /// Groups that produced no entry at all.
    pub fn omitted(&self) -> usize {
        self.unrecognized_day + self.too_few_stops + self.unroutable
    }

    fn record(&mut self, outcome: &GroupOutcome) {
        self.groups += 1;
        match outcome {
            GroupOutcome::Placed {
                trips,
                needs_review,
                reclassified,
            } => {
                self.placed_groups += 1;
                self.entries += trips.len();
                self.branch_entries += trips.len().saturating_sub(1);
                self.needs_review += usize::from(*needs_review);
                self.reclassified += usize::from(*reclassified);
            }
            GroupOutcome::UnrecognizedDay(_) => self.unrecognized_day += 1,
            GroupOutcome::TooFewStops => self.too_few_stops += 1,
            GroupOutcome::Unroutable(_) => self.unroutable += 1,
        }
    }
}

/// Build the whole timetable from trip-groups.
pub fn build_timetable(groups: &[TripGroup], config: &NetworkConfig) -> (Timetable, BuildStats) {
    let mut stats = BuildStats::default();
    let mut placed = Vec::new();

    for group in groups {
        let outcome = build_entries(group, config);
        stats.record(&outcome);
        if let GroupOutcome::Placed { trips, .. } = outcome {
            placed.extend(trips);
        }
    }

    debug!(
        groups = stats.groups,
        entries = stats.entries,
        omitted = stats.omitted(),
        needs_review = stats.needs_review,
        "timetable built"
    );

    (Timetable::from_entries(placed), stats)
}
