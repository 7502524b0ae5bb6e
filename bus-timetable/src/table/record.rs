//! Raw rows of the origin-destination table.

/// One observed leg: a departure and an arrival of the same trip.
///
/// The table is a matrix of stop pairings, not a log of consecutive stops,
/// so a trip usually has many overlapping legs. Every field is optional;
/// blank cells are `None` and nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegObservation {
    pub departure_stop: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_stop: Option<String>,
    pub arrival_time: Option<String>,
    pub line_variant_hint: Option<String>,
    pub day_descriptor: Option<String>,
    pub direction: Option<String>,
    pub trip_key: Option<String>,
}

impl LegObservation {
    /// Shorthand for a leg with only stops and times, used heavily in tests.
    pub fn between(
        departure_stop: &str,
        departure_time: &str,
        arrival_stop: &str,
        arrival_time: &str,
    ) -> Self {
        Self {
            departure_stop: Some(departure_stop.to_string()),
            departure_time: Some(departure_time.to_string()),
            arrival_stop: Some(arrival_stop.to_string()),
            arrival_time: Some(arrival_time.to_string()),
            ..Self::default()
        }
    }

    /// The key shared by all legs of one trip.
    pub fn group_key(&self) -> TripGroupKey {
        TripGroupKey {
            day: self.day_descriptor.clone(),
            direction: self.direction.clone(),
            line_variant_hint: self.line_variant_hint.clone(),
            trip_key: self.trip_key.clone(),
        }
    }
}

/// Identifies a trip-group: (day, direction, declared variant, trip id).
///
/// Absent values are part of the key, so legs with a blank variant still
/// group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripGroupKey {
    pub day: Option<String>,
    pub direction: Option<String>,
    pub line_variant_hint: Option<String>,
    pub trip_key: Option<String>,
}

/// All legs observed for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripGroup {
    pub key: TripGroupKey,
    pub legs: Vec<LegObservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn between_sets_only_stops_and_times() {
        let leg = LegObservation::between("Manresa", "07:00", "Abrera", "07:30");
        assert_eq!(leg.departure_stop.as_deref(), Some("Manresa"));
        assert_eq!(leg.arrival_time.as_deref(), Some("07:30"));
        assert!(leg.trip_key.is_none());
        assert!(leg.direction.is_none());
    }

    #[test]
    fn group_key_ignores_stops() {
        let mut a = LegObservation::between("Manresa", "07:00", "Abrera", "07:30");
        let mut b = LegObservation::between("Abrera", "07:30", "BCN Sants", "08:10");
        for leg in [&mut a, &mut b] {
            leg.trip_key = Some("4".into());
            leg.day_descriptor = Some("Dissabtes i Festius".into());
        }
        assert_eq!(a.group_key(), b.group_key());

        b.line_variant_hint = Some("e22".into());
        assert_ne!(a.group_key(), b.group_key());
    }
}
