//! Domain error types.
//!
//! These errors represent invariant violations when building domain values.
//! They are distinct from table/IO errors.

use super::StopName;

/// Domain-level errors for trip construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A trip needs an origin and a destination
    #[error("trip needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    /// A stop appears twice in one trip
    #[error("stop {0} appears more than once")]
    DuplicateStop(StopName),

    /// Visits are not in time order
    #[error("visit to {0} is earlier than the visit before it")]
    OutOfOrder(StopName),

    /// Slice bounds are empty or outside the trip
    #[error("invalid slice {start}..={end} of a trip with {len} stops")]
    InvalidSlice { start: usize, end: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::TooFewStops(1);
        assert_eq!(err.to_string(), "trip needs at least 2 stops, got 1");

        let stop = StopName::parse("Abrera").unwrap();
        let err = DomainError::DuplicateStop(stop.clone());
        assert_eq!(err.to_string(), "stop Abrera appears more than once");

        let err = DomainError::OutOfOrder(stop);
        assert_eq!(
            err.to_string(),
            "visit to Abrera is earlier than the visit before it"
        );

        let err = DomainError::InvalidSlice {
            start: 3,
            end: 1,
            len: 5,
        };
        assert_eq!(err.to_string(), "invalid slice 3..=1 of a trip with 5 stops");
    }
}
