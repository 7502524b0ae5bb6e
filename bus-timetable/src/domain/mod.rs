//! Domain types for the bus timetable.
//!
//! This module contains the validated values the engine works with. All
//! types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod day;
mod error;
mod section;
mod stop;
mod time;
mod trip;
mod variant;

pub use day::{DayBucket, DayClass, DayTokens, classify_day};
pub use error::DomainError;
pub use section::{Direction, RouteSection};
pub use stop::{PLACEHOLDER, StopName};
pub use time::{ClockTime, MINUTES_PER_DAY, minute_of_day, normalize_time};
pub use trip::{StopVisit, TripEntry, TripId, TripSequence};
pub use variant::LineVariant;
