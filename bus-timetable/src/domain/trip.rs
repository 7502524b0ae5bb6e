//! Trip types.
//!
//! A `TripSequence` is the reconstructed itinerary of one bus trip: the
//! stops it calls at, in order, with the time of each call. A `TripEntry`
//! pairs a sequence with the trip's identifier for publication.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::{ClockTime, DomainError, StopName};

/// A call at a stop within a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopVisit {
    /// Stop name
    pub stop: StopName,
    /// Time as printed in the timetable
    pub clock: ClockTime,
    /// Minutes since the service day started, after midnight adjustment.
    /// Values of 1440 and above are calls after midnight.
    pub minute_offset: u32,
}

impl StopVisit {
    /// Creates a visit whose offset is the plain time of day.
    pub fn new(stop: StopName, clock: ClockTime) -> Self {
        Self {
            minute_offset: clock.minute_of_day(),
            stop,
            clock,
        }
    }
}

/// The ordered itinerary of one trip.
///
/// # Invariants
///
/// - At least 2 visits
/// - Stop names are unique
/// - `minute_offset` is non-decreasing
///
/// Sequences are never modified after construction; [`TripSequence::slice`]
/// copies the requested range into a new sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSequence {
    visits: Vec<StopVisit>,
}

impl TripSequence {
    /// Constructs a sequence from visits already in travel order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_timetable::domain::{ClockTime, StopName, StopVisit, TripSequence};
    ///
    /// let visit = |s: &str, t: &str| {
    ///     StopVisit::new(StopName::parse(s).unwrap(), ClockTime::parse(t).unwrap())
    /// };
    ///
    /// let trip = TripSequence::new(vec![visit("Manresa", "07:00"), visit("BCN Sants", "08:10")]).unwrap();
    /// assert_eq!(trip.len(), 2);
    ///
    /// // A single stop is not a trip
    /// assert!(TripSequence::new(vec![visit("Manresa", "07:00")]).is_err());
    /// ```
    pub fn new(visits: Vec<StopVisit>) -> Result<Self, DomainError> {
        if visits.len() < 2 {
            return Err(DomainError::TooFewStops(visits.len()));
        }

        let mut seen = HashSet::with_capacity(visits.len());
        for visit in &visits {
            if !seen.insert(&visit.stop) {
                return Err(DomainError::DuplicateStop(visit.stop.clone()));
            }
        }

        for window in visits.windows(2) {
            if window[1].minute_offset < window[0].minute_offset {
                return Err(DomainError::OutOfOrder(window[1].stop.clone()));
            }
        }

        Ok(Self { visits })
    }

    /// Returns all visits in order.
    pub fn visits(&self) -> &[StopVisit] {
        &self.visits
    }

    /// Returns the number of stops.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns true if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the first call. Never fails: a sequence has at least two.
    pub fn departure(&self) -> &StopVisit {
        &self.visits[0]
    }

    /// Returns the last call.
    pub fn arrival(&self) -> &StopVisit {
        &self.visits[self.visits.len() - 1]
    }

    /// Returns the stop names in order.
    pub fn stops(&self) -> impl Iterator<Item = &StopName> {
        self.visits.iter().map(|v| &v.stop)
    }

    /// True if any stop starts with any of the tokens.
    pub fn calls_at_any<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        self.stops().any(|s| s.has_any_prefix(tokens))
    }

    /// Index of the first stop matching any of the tokens.
    pub fn first_index_of<S: AsRef<str>>(&self, tokens: &[S]) -> Option<usize> {
        self.stops().position(|s| s.has_any_prefix(tokens))
    }

    /// Index of the last stop matching any of the tokens.
    pub fn last_index_of<S: AsRef<str>>(&self, tokens: &[S]) -> Option<usize> {
        self.visits.iter().rposition(|v| v.stop.has_any_prefix(tokens))
    }

    /// Copy the closed range `start..=end` into a new sequence.
    ///
    /// Requires `start < end < len`, so the result always has at least two
    /// stops. Slicing a slice over its own full range returns an equal
    /// sequence.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self, DomainError> {
        if start >= end || end >= self.visits.len() {
            return Err(DomainError::InvalidSlice {
                start,
                end,
                len: self.visits.len(),
            });
        }
        Ok(Self {
            visits: self.visits[start..=end].to_vec(),
        })
    }
}

/// Identifier of a trip within its day type.
///
/// All-digit keys are published as numbers, anything else as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TripId {
    Number(u64),
    Text(String),
}

impl TripId {
    /// Parse a raw trip key.
    ///
    /// ```
    /// use bus_timetable::domain::TripId;
    ///
    /// assert_eq!(TripId::parse("42"), TripId::Number(42));
    /// assert_eq!(TripId::parse("42b"), TripId::Text("42b".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse() {
                return TripId::Number(n);
            }
        }
        TripId::Text(trimmed.to_string())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripId::Number(n) => write!(f, "{n}"),
            TripId::Text(s) => f.write_str(s),
        }
    }
}

/// A trip as published in one section of the timetable.
///
/// The same trip may appear in two sections (full itinerary and branch
/// slice) under the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripEntry {
    pub trip_id: TripId,
    pub sequence: TripSequence,
}

impl TripEntry {
    pub fn new(trip_id: TripId, sequence: TripSequence) -> Self {
        Self { trip_id, sequence }
    }

    /// Departure time of the first stop.
    pub fn start_time(&self) -> ClockTime {
        self.sequence.departure().clock
    }

    /// Arrival time at the last stop.
    pub fn end_time(&self) -> ClockTime {
        self.sequence.arrival().clock
    }
}
