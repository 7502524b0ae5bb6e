//! Stop name type.

use std::fmt;

use serde::Serialize;

/// Cell text used by the source table for "no observation".
pub const PLACEHOLDER: &str = "-";

/// A stop name as printed in the timetable.
///
/// Stop names are opaque: the only structure the engine relies on is a
/// case-insensitive prefix match against known place tokens (e.g. every
/// Barcelona stop starts with "BCN"). Names are trimmed, never empty and
/// never the placeholder.
///
/// # Examples
///
/// ```
/// use bus_timetable::domain::StopName;
///
/// let stop = StopName::parse(" Olesa de Montserrat ").unwrap();
/// assert_eq!(stop.as_str(), "Olesa de Montserrat");
/// assert!(stop.has_prefix("OLESA"));
///
/// assert!(StopName::parse("-").is_none());
/// assert!(StopName::parse("   ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopName(String);

impl StopName {
    /// Parse a raw cell. Blank cells and the placeholder yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            return None;
        }
        Some(StopName(trimmed.to_string()))
    }

    /// Returns the stop name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the uppercased name starts with the (uppercase) token.
    pub fn has_prefix(&self, token: &str) -> bool {
        self.0.to_uppercase().starts_with(&token.to_uppercase())
    }

    /// True if the name starts with any of the tokens.
    pub fn has_any_prefix<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        tokens.iter().any(|t| self.has_prefix(t.as_ref()))
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
