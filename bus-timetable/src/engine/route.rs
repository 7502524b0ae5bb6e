//! Section routing and branch slicing.
//!
//! Every routable trip is published in full under the main section of its
//! declared direction. Trips that also serve the branch are published a
//! second time, cut down to the part between the branch terminus and the
//! capital, under the branch section.

use crate::config::PlaceTokens;
use crate::domain::{Direction, LineVariant, RouteSection, TripSequence};

/// A trip sequence assigned to a section under a display variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub section: RouteSection,
    pub variant: LineVariant,
    pub sequence: TripSequence,
}

/// Outcome of looking for the branch part of a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSlice {
    /// The trip serves the branch; this is the part to publish.
    Sliced(TripSequence),
    /// The trip does not call at both ends of the branch section.
    NotServed,
    /// Both ends are present but in the wrong order for the direction.
    /// Not published; needs a human to look at the source data.
    OutOfOrder { start: usize, end: usize },
}

/// Where a trip goes in the timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    /// Full itinerary in the direction's main section
    pub primary: Placement,
    /// Sliced itinerary in the direction's branch section
    pub branch: Option<Placement>,
    /// True when the branch ends were found out of order
    pub needs_review: bool,
}

/// Find the branch part of a trip.
///
/// Outbound trips run from the first branch-terminus stop to the last
/// capital stop; inbound trips from the first capital stop to the last
/// branch-terminus stop. The start must come strictly before the end.
///
/// # Examples
///
/// ```
/// use bus_timetable::config::PlaceTokens;
/// use bus_timetable::domain::{ClockTime, Direction, StopName, StopVisit, TripSequence};
/// use bus_timetable::engine::{branch_slice, BranchSlice};
///
/// let visit = |s: &str, t: &str| {
///     StopVisit::new(StopName::parse(s).unwrap(), ClockTime::parse(t).unwrap())
/// };
/// let trip = TripSequence::new(vec![
///     visit("Manresa", "06:30"),
///     visit("Olesa", "07:00"),
///     visit("BCN Sants", "07:40"),
/// ]).unwrap();
///
/// match branch_slice(&trip, Direction::Outbound, &PlaceTokens::default()) {
///     BranchSlice::Sliced(sub) => assert_eq!(sub.len(), 2),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn branch_slice(
    sequence: &TripSequence,
    direction: Direction,
    places: &PlaceTokens,
) -> BranchSlice {
    let (start_tokens, end_tokens) = match direction {
        Direction::Outbound => (&places.branch_termini, &places.capital),
        Direction::Inbound => (&places.capital, &places.branch_termini),
    };

    let (Some(start), Some(end)) = (
        sequence.first_index_of(start_tokens),
        sequence.last_index_of(end_tokens),
    ) else {
        return BranchSlice::NotServed;
    };

    match sequence.slice(start, end) {
        Ok(sub) => BranchSlice::Sliced(sub),
        Err(_) => BranchSlice::OutOfOrder { start, end },
    }
}

/// Route a classified trip.
///
/// The variant is clamped to what each section shows: a variant a section
/// does not list is published there as `Generic`.
pub fn route_trip(
    sequence: &TripSequence,
    direction: Direction,
    variant: LineVariant,
    places: &PlaceTokens,
) -> Routing {
    let main = RouteSection::main_for(direction);
    let primary = Placement {
        section: main,
        variant: variant.clamp_to(&main.allowed_variants()),
        sequence: sequence.clone(),
    };

    let branch_section = RouteSection::branch_for(direction);
    let (branch, needs_review) = match branch_slice(sequence, direction, places) {
        BranchSlice::Sliced(sub) => (
            Some(Placement {
                section: branch_section,
                variant: variant.clamp_to(&branch_section.allowed_variants()),
                sequence: sub,
            }),
            false,
        ),
        BranchSlice::NotServed => (None, false),
        BranchSlice::OutOfOrder { .. } => (None, true),
    };

    Routing {
        primary,
        branch,
        needs_review,
    }
}
