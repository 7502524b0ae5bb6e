//! Day-type classification.
//!
//! The source table describes service days in free text ("Dissabtes i
//! Festius", "Diumenges, excepte festiu", ...). The timetable only shows
//! three buckets, so every descriptor is mapped onto one of them or left
//! unrecognized.

use serde::Deserialize;

/// One of the three day buckets shown in the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayBucket {
    /// Working days, Monday to Friday
    Weekday,
    /// Saturdays and public holidays
    SaturdayHoliday,
    /// Sundays that are not holidays
    Sunday,
}

impl DayBucket {
    /// All buckets in display order.
    pub const ALL: [DayBucket; 3] = [
        DayBucket::Weekday,
        DayBucket::SaturdayHoliday,
        DayBucket::Sunday,
    ];
}

/// Result of classifying a day descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayClass {
    /// The descriptor maps onto a known bucket.
    Bucket(DayBucket),
    /// Unknown descriptor, kept verbatim (trimmed).
    Unrecognized(String),
}

impl DayClass {
    /// Returns the bucket, if recognized.
    pub fn bucket(&self) -> Option<DayBucket> {
        match self {
            DayClass::Bucket(b) => Some(*b),
            DayClass::Unrecognized(_) => None,
        }
    }
}

/// Display labels and matching tokens for the day buckets.
///
/// Tokens are matched as lowercase substrings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DayTokens {
    pub weekday_label: String,
    pub saturday_holiday_label: String,
    pub sunday_label: String,

    pub sunday: Vec<String>,
    pub saturday_holiday: Vec<String>,
    pub weekday: Vec<String>,
}

impl DayTokens {
    /// The display label of a bucket.
    pub fn label(&self, bucket: DayBucket) -> &str {
        match bucket {
            DayBucket::Weekday => &self.weekday_label,
            DayBucket::SaturdayHoliday => &self.saturday_holiday_label,
            DayBucket::Sunday => &self.sunday_label,
        }
    }
}

impl Default for DayTokens {
    fn default() -> Self {
        Self {
            weekday_label: "Dilluns a divendres feiners, excepte agost".into(),
            saturday_holiday_label: "Dissabtes i Festius".into(),
            sunday_label: "Diumenges, excepte festiu".into(),
            sunday: vec!["diumenge".into()],
            saturday_holiday: vec!["dissabte".into(), "festiu".into()],
            weekday: vec!["dilluns".into(), "feiner".into()],
        }
    }
}

/// Classify a free-text day descriptor.
///
/// An exact (case-insensitive) bucket label wins. Otherwise tokens are tried
/// as substrings in a fixed order: Sunday, then Saturday/holiday, then
/// weekday. Sunday goes first because Sunday descriptors mention holidays
/// ("Diumenges, excepte festiu").
///
/// # Examples
///
/// ```
/// use bus_timetable::domain::{classify_day, DayBucket, DayClass, DayTokens};
///
/// let tokens = DayTokens::default();
/// assert_eq!(
///     classify_day("DIUMENGES, excepte festiu", &tokens),
///     DayClass::Bucket(DayBucket::Sunday)
/// );
/// assert_eq!(
///     classify_day("Festius", &tokens),
///     DayClass::Bucket(DayBucket::SaturdayHoliday)
/// );
/// ```
pub fn classify_day(descriptor: &str, tokens: &DayTokens) -> DayClass {
    let trimmed = descriptor.trim();
    let low = trimmed.to_lowercase();

    for bucket in DayBucket::ALL {
        if tokens.label(bucket).to_lowercase() == low {
            return DayClass::Bucket(bucket);
        }
    }

    let ordered = [
        (DayBucket::Sunday, &tokens.sunday),
        (DayBucket::SaturdayHoliday, &tokens.saturday_holiday),
        (DayBucket::Weekday, &tokens.weekday),
    ];
    for (bucket, words) in ordered {
        if words.iter().any(|w| low.contains(&w.to_lowercase())) {
            return DayClass::Bucket(bucket);
        }
    }

    DayClass::Unrecognized(trimmed.to_string())
}
