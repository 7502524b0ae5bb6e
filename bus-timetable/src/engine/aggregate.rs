//! The published timetable tree.
//!
//! Trips are grouped by section, day bucket and line variant. Every one of
//! the 4 x 3 x 3 leaves exists from the start, so readers never have to
//! distinguish "no trips" from "missing".

use std::collections::BTreeMap;

use crate::domain::{DayBucket, LineVariant, RouteSection, TripEntry};

/// A trip entry together with the leaf it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedTrip {
    pub section: RouteSection,
    pub day: DayBucket,
    pub variant: LineVariant,
    pub entry: TripEntry,
}

type LeafKey = (RouteSection, DayBucket, LineVariant);

/// Section -> day bucket -> variant -> trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    leaves: BTreeMap<LeafKey, Vec<TripEntry>>,
}

impl Timetable {
    /// An empty timetable with every leaf present.
    pub fn new() -> Self {
        let mut leaves = BTreeMap::new();
        for section in RouteSection::ALL {
            for day in DayBucket::ALL {
                for variant in LineVariant::ALL {
                    leaves.insert((section, day, variant), Vec::new());
                }
            }
        }
        Self { leaves }
    }

    /// Build a sorted timetable from placed trips.
    ///
    /// This is a fold over an empty timetable followed by one sort, so
    /// partial timetables built from disjoint inputs can be combined with
    /// [`Timetable::merge`] to the same result.
    pub fn from_entries<I>(trips: I) -> Self
    where
        I: IntoIterator<Item = PlacedTrip>,
    {
        let mut timetable = trips
            .into_iter()
            .fold(Self::new(), |mut timetable, trip| {
                timetable.insert(trip);
                timetable
            });
        timetable.sort_leaves();
        timetable
    }

    /// Append a trip to its leaf. Call [`Timetable::sort_leaves`] afterwards.
    pub fn insert(&mut self, trip: PlacedTrip) {
        self.leaves
            .entry((trip.section, trip.day, trip.variant))
            .or_default()
            .push(trip.entry);
    }

    /// Combine two timetables and re-sort.
    pub fn merge(mut self, other: Timetable) -> Self {
        for (key, mut entries) in other.leaves {
            self.leaves.entry(key).or_default().append(&mut entries);
        }
        self.sort_leaves();
        self
    }

    /// Order every leaf by departure time, then trip id as text.
    pub fn sort_leaves(&mut self) {
        for entries in self.leaves.values_mut() {
            entries.sort_by_cached_key(sort_key);
        }
    }

    /// The trips of one leaf.
    pub fn leaf(&self, section: RouteSection, day: DayBucket, variant: LineVariant) -> &[TripEntry] {
        self.leaves
            .get(&(section, day, variant))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of leaves (always 36).
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Total number of published entries across all leaves.
    pub fn entry_count(&self) -> usize {
        self.leaves.values().map(Vec::len).sum()
    }
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}

/// `(departure minute of day, trip id text)`.
///
/// Every entry has a parsed departure: calls without a usable time are
/// dropped during reconstruction, so no entry reaches a leaf without one.
fn sort_key(entry: &TripEntry) -> (u32, String) {
    (entry.start_time().minute_of_day(), entry.trip_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, StopName, StopVisit, TripId, TripSequence};

    fn entry(id: TripId, start: &str) -> TripEntry {
        let start = ClockTime::parse(start).unwrap();
        let end = ClockTime::from_minute_of_day((start.minute_of_day() + 30).min(1439)).unwrap();
        let sequence = TripSequence::new(vec![
            StopVisit::new(StopName::parse("Manresa").unwrap(), start),
            StopVisit::new(StopName::parse("BCN Sants").unwrap(), end),
        ])
        .unwrap();
        TripEntry::new(id, sequence)
    }

    fn placed(section: RouteSection, day: DayBucket, variant: LineVariant, e: TripEntry) -> PlacedTrip {
        PlacedTrip {
            section,
            day,
            variant,
            entry: e,
        }
    }

    fn ids(entries: &[TripEntry]) -> Vec<String> {
        entries.iter().map(|e| e.trip_id.to_string()).collect()
    }

    #[test]
    fn every_leaf_exists() {
        let timetable = Timetable::new();
        assert_eq!(timetable.leaf_count(), 36);
        for section in RouteSection::ALL {
            for day in DayBucket::ALL {
                for variant in LineVariant::ALL {
                    assert!(timetable.leaf(section, day, variant).is_empty());
                }
            }
        }
        assert_eq!(timetable.entry_count(), 0);
    }

    #[test]
    fn leaves_sorted_by_departure() {
        let timetable = Timetable::from_entries(vec![
            placed(
                RouteSection::OutboundMain,
                DayBucket::Weekday,
                LineVariant::Primary,
                entry(TripId::Number(1), "09:00"),
            ),
            placed(
                RouteSection::OutboundMain,
                DayBucket::Weekday,
                LineVariant::Primary,
                entry(TripId::Number(2), "06:15"),
            ),
            placed(
                RouteSection::OutboundMain,
                DayBucket::Weekday,
                LineVariant::Primary,
                entry(TripId::Number(3), "00:00"),
            ),
        ]);

        let leaf = timetable.leaf(RouteSection::OutboundMain, DayBucket::Weekday, LineVariant::Primary);
        assert_eq!(ids(leaf), ["3", "2", "1"]);
        assert_eq!(timetable.leaf_count(), 36);
        assert_eq!(timetable.entry_count(), 3);
    }

    #[test]
    fn ties_sorted_by_id_text() {
        let key = (RouteSection::InboundMain, DayBucket::Sunday, LineVariant::Generic);
        let timetable = Timetable::from_entries(
            [
                TripId::Number(10),
                TripId::Number(9),
                TripId::Text("1a".into()),
            ]
            .into_iter()
            .map(|id| placed(key.0, key.1, key.2, entry(id, "07:00"))),
        );

        // Text order: "10" < "1a" < "9"
        assert_eq!(ids(timetable.leaf(key.0, key.1, key.2)), ["10", "1a", "9"]);
    }

    #[test]
    fn leaves_are_independent() {
        let timetable = Timetable::from_entries(vec![
            placed(
                RouteSection::OutboundMain,
                DayBucket::Weekday,
                LineVariant::Primary,
                entry(TripId::Number(1), "09:00"),
            ),
            placed(
                RouteSection::OutboundBranch,
                DayBucket::Weekday,
                LineVariant::Primary,
                entry(TripId::Number(1), "09:20"),
            ),
        ]);

        assert_eq!(
            timetable
                .leaf(RouteSection::OutboundMain, DayBucket::Weekday, LineVariant::Primary)
                .len(),
            1
        );
        assert_eq!(
            timetable
                .leaf(RouteSection::OutboundBranch, DayBucket::Weekday, LineVariant::Primary)
                .len(),
            1
        );
        assert!(timetable
            .leaf(RouteSection::OutboundMain, DayBucket::Sunday, LineVariant::Primary)
            .is_empty());
    }

    #[test]
    fn merge_matches_single_fold() {
        let trips: Vec<PlacedTrip> = ["08:00", "07:00", "09:30", "06:45"]
            .iter()
            .enumerate()
            .map(|(i, t)| {
                placed(
                    RouteSection::InboundBranch,
                    DayBucket::SaturdayHoliday,
                    LineVariant::Branch,
                    entry(TripId::Number(i as u64), t),
                )
            })
            .collect();

        let whole = Timetable::from_entries(trips.clone());
        let (left, right) = trips.split_at(2);
        let merged = Timetable::from_entries(left.to_vec()).merge(Timetable::from_entries(right.to_vec()));

        assert_eq!(whole, merged);
    }

    #[test]
    fn day_boundaries_sort_by_clock() {
        let key = (RouteSection::OutboundMain, DayBucket::Weekday, LineVariant::Generic);
        let timetable = Timetable::from_entries(
            [(1, "23:59"), (2, "00:00"), (3, "12:00")]
                .into_iter()
                .map(|(id, t)| placed(key.0, key.1, key.2, entry(TripId::Number(id), t))),
        );

        assert_eq!(ids(timetable.leaf(key.0, key.1, key.2)), ["2", "3", "1"]);
        let last = &timetable.leaf(key.0, key.1, key.2)[2];
        assert_eq!(last.end_time().to_string(), "23:59");
    }
}
