//! Clock time handling for timetable cells.
//!
//! The source table writes times as "H:MM", "HH:MM" or "HH.MM", and uses a
//! placeholder ("-") where a stop is not served. This module canonicalizes
//! that text to "HH:MM" and converts it to minutes since midnight.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in one service day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Canonicalize raw time text to zero-padded "HH:MM".
///
/// Dots are accepted as separators. Text that does not look like
/// `H(H):MM` is returned trimmed but otherwise unchanged, so that callers
/// can reject it later with [`minute_of_day`].
///
/// # Examples
///
/// ```
/// use bus_timetable::domain::normalize_time;
///
/// assert_eq!(normalize_time("7.05"), "07:05");
/// assert_eq!(normalize_time(" 23:40 "), "23:40");
/// assert_eq!(normalize_time("-"), "-");
/// ```
pub fn normalize_time(raw: &str) -> String {
    let s = raw.trim().replace('.', ":");

    let Some((hours, minutes)) = s.split_once(':') else {
        return s;
    };

    let hours_ok = (1..=2).contains(&hours.len()) && hours.bytes().all(|b| b.is_ascii_digit());
    let minutes_ok = minutes.len() == 2 && minutes.bytes().all(|b| b.is_ascii_digit());
    if !hours_ok || !minutes_ok {
        return s;
    }

    format!("{:0>2}:{}", hours, minutes)
}

/// Convert canonical "HH:MM" text to minutes since midnight.
///
/// Returns `None` for anything that is not exactly two hour digits, a colon
/// and two minute digits, or that is out of range. `None` means "no
/// observation", never zero.
pub fn minute_of_day(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }

    let hour = parse_two_digits(&bytes[0..2])?;
    let minute = parse_two_digits(&bytes[3..5])?;
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * 60 + minute)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A validated time of day, as printed in the timetable.
///
/// # Examples
///
/// ```
/// use bus_timetable::domain::ClockTime;
///
/// let t = ClockTime::parse("8.5").is_none();
/// assert!(t);
///
/// let t = ClockTime::parse("8.05").unwrap();
/// assert_eq!(t.to_string(), "08:05");
/// assert_eq!(t.minute_of_day(), 485);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse raw cell text. Placeholders and malformed text yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let minutes = minute_of_day(&normalize_time(raw))?;
        Self::from_minute_of_day(minutes)
    }

    /// Build from minutes since midnight (0-1439).
    pub fn from_minute_of_day(minutes: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).map(Self)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight, without any wraparound adjustment.
    pub fn minute_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range H:MM or HH.MM string normalizes to a parseable time
        #[test]
        fn valid_times_roundtrip(hour in 0u32..24, minute in 0u32..60, dot in any::<bool>(), pad in any::<bool>()) {
            let sep = if dot { '.' } else { ':' };
            let raw = if pad {
                format!("{:02}{}{:02}", hour, sep, minute)
            } else {
                format!("{}{}{:02}", hour, sep, minute)
            };
            let canonical = normalize_time(&raw);
            prop_assert_eq!(&canonical, &format!("{:02}:{:02}", hour, minute));
            prop_assert_eq!(minute_of_day(&canonical), Some(hour * 60 + minute));
        }

        /// Minute offsets always land in a single day
        #[test]
        fn minute_of_day_in_range(s in "[0-9]{2}:[0-9]{2}") {
            if let Some(m) = minute_of_day(&s) {
                prop_assert!(m < MINUTES_PER_DAY);
            }
        }

        /// Normalizing twice is the same as normalizing once
        #[test]
        fn normalize_idempotent(s in "[0-9:. -]{0,8}") {
            let once = normalize_time(&s);
            prop_assert_eq!(normalize_time(&once), once.clone());
        }
    }
}
