//! Line-variant classification.
//!
//! The declared variant in the source table is advisory. Some trips are
//! tagged as the branch line but never go near the branch; stop membership
//! decides in that case.

use crate::config::{PlaceTokens, VariantLabels};
use crate::domain::{LineVariant, TripSequence};

/// Resolve the declared variant text on its own.
///
/// Only an exact (trimmed, case-insensitive) match of the primary or branch
/// label counts; anything else, including no hint, is `Generic`.
pub fn declared_variant(hint: Option<&str>, labels: &VariantLabels) -> LineVariant {
    let Some(hint) = hint.map(str::trim) else {
        return LineVariant::Generic;
    };

    if hint.eq_ignore_ascii_case(labels.primary.trim()) {
        LineVariant::Primary
    } else if hint.eq_ignore_ascii_case(labels.branch.trim()) {
        LineVariant::Branch
    } else {
        LineVariant::Generic
    }
}

/// Classify a reconstructed trip.
///
/// Starts from [`declared_variant`], then repairs one known mislabeling: a
/// trip declared as the branch line that calls at the hub but at neither
/// branch terminus is really the primary line.
///
/// # Examples
///
/// ```
/// use bus_timetable::config::NetworkConfig;
/// use bus_timetable::domain::{ClockTime, LineVariant, StopName, StopVisit, TripSequence};
/// use bus_timetable::engine::classify_variant;
///
/// let config = NetworkConfig::default();
/// let visit = |s: &str, t: &str| {
///     StopVisit::new(StopName::parse(s).unwrap(), ClockTime::parse(t).unwrap())
/// };
/// let trip = TripSequence::new(vec![
///     visit("MANRESA Passeig", "07:00"),
///     visit("BCN Sants", "08:00"),
/// ]).unwrap();
///
/// let variant = classify_variant(&trip, Some("E23"), &config.variants, &config.places);
/// assert_eq!(variant, LineVariant::Primary);
/// ```
pub fn classify_variant(
    sequence: &TripSequence,
    hint: Option<&str>,
    labels: &VariantLabels,
    places: &PlaceTokens,
) -> LineVariant {
    let declared = declared_variant(hint, labels);

    if declared == LineVariant::Branch
        && sequence.calls_at_any(&places.hub)
        && !sequence.calls_at_any(&places.branch_termini)
    {
        return LineVariant::Primary;
    }

    declared
}
