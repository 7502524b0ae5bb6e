//! Serializable shape of the published timetable.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::config::NetworkConfig;
use crate::domain::{DayBucket, LineVariant, RouteSection, TripEntry, TripId};
use crate::engine::Timetable;

/// The whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimetableDocument {
    pub sections: Vec<SectionDto>,
}

/// One route section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDto {
    /// Short identifier (m2b, b2m, o2b, b2o)
    pub id: String,

    /// Display title
    pub title: String,

    /// Variant keys shown in this section, in display order
    #[serde(rename = "busTypeOrder")]
    pub bus_type_order: Vec<String>,

    pub days: Vec<DayDto>,
}

/// One day bucket within a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDto {
    /// Canonical day label
    pub name: String,

    /// Trips per variant key
    pub buses: BusesDto,
}

/// Variant key -> trips, serialized as an object in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusesDto(pub Vec<(String, Vec<TripDto>)>);

impl Serialize for BusesDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, trips) in &self.0 {
            map.serialize_entry(key, trips)?;
        }
        map.end()
    }
}

/// One published trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripDto {
    pub trip_id: TripId,
    pub start_time: String,
    pub end_time: String,
    pub stops: Vec<StopDto>,
}

/// One call of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopDto {
    pub stop: String,
    pub time: String,
}

// Conversion implementations

impl TimetableDocument {
    /// Lay out a timetable with the labels and titles of `config`.
    ///
    /// Sections, day buckets and variants always appear in their fixed
    /// order, including empty ones.
    pub fn from_timetable(timetable: &Timetable, config: &NetworkConfig) -> Self {
        let sections = RouteSection::ALL
            .into_iter()
            .map(|section| SectionDto::from_section(timetable, section, config))
            .collect();
        Self { sections }
    }

    /// Number of trips across the document.
    pub fn trip_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.days)
            .flat_map(|d| &d.buses.0)
            .map(|(_, trips)| trips.len())
            .sum()
    }
}

impl SectionDto {
    fn from_section(timetable: &Timetable, section: RouteSection, config: &NetworkConfig) -> Self {
        let days = DayBucket::ALL
            .into_iter()
            .map(|day| DayDto::from_day(timetable, section, day, config))
            .collect();

        Self {
            id: section.id().to_string(),
            title: config.sections.title(section).to_string(),
            bus_type_order: section
                .allowed_variants()
                .into_iter()
                .map(|v| config.variants.label(v).to_string())
                .collect(),
            days,
        }
    }
}

impl DayDto {
    fn from_day(
        timetable: &Timetable,
        section: RouteSection,
        day: DayBucket,
        config: &NetworkConfig,
    ) -> Self {
        let buses = LineVariant::ALL
            .into_iter()
            .map(|variant| {
                let trips = timetable
                    .leaf(section, day, variant)
                    .iter()
                    .map(TripDto::from_entry)
                    .collect();
                (config.variants.label(variant).to_string(), trips)
            })
            .collect();

        Self {
            name: config.days.label(day).to_string(),
            buses: BusesDto(buses),
        }
    }
}

impl TripDto {
    /// Convert a trip entry. Times are the wall-clock times, not offsets.
    pub fn from_entry(entry: &TripEntry) -> Self {
        Self {
            trip_id: entry.trip_id.clone(),
            start_time: entry.start_time().to_string(),
            end_time: entry.end_time().to_string(),
            stops: entry
                .sequence
                .visits()
                .iter()
                .map(|v| StopDto {
                    stop: v.stop.as_str().to_string(),
                    time: v.clock.to_string(),
                })
                .collect(),
        }
    }
}
