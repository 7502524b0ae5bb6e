//! Loading the origin-destination table.
//!
//! The input is a CSV file with one row per observed leg. Loading checks
//! the header for every required column before reading any rows, so a
//! structurally wrong file fails immediately instead of producing an empty
//! timetable.

mod error;
mod record;

pub use error::TableError;
pub use record::{LegObservation, TripGroup, TripGroupKey};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::debug;

use crate::config::ColumnNames;

/// Positions of the required columns in the header.
struct ColumnIndex {
    line_variant: usize,
    day: usize,
    direction: usize,
    departure_stop: usize,
    departure_time: usize,
    arrival_stop: usize,
    arrival_time: usize,
    trip_key: usize,
}

impl ColumnIndex {
    /// Locate every required column, reporting all missing ones together.
    fn locate(headers: &ByteRecord, columns: &ColumnNames) -> Result<Self, TableError> {
        let names = columns.required();
        let found = names.map(|name| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == name)
        });

        let [
            Some(line_variant),
            Some(day),
            Some(direction),
            Some(departure_stop),
            Some(departure_time),
            Some(arrival_stop),
            Some(arrival_time),
            Some(trip_key),
        ] = found
        else {
            let missing = names
                .iter()
                .zip(found)
                .filter(|(_, index)| index.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return Err(TableError::MissingColumns(missing));
        };

        Ok(Self {
            line_variant,
            day,
            direction,
            departure_stop,
            departure_time,
            arrival_stop,
            arrival_time,
            trip_key,
        })
    }

    /// Read one row. Cells that are not valid UTF-8 are decoded lossily
    /// rather than failing the row.
    fn read(&self, record: &ByteRecord) -> LegObservation {
        let cell = |i: usize| {
            record
                .get(i)
                .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
                .filter(|s| !s.is_empty())
        };
        LegObservation {
            departure_stop: cell(self.departure_stop),
            departure_time: cell(self.departure_time),
            arrival_stop: cell(self.arrival_stop),
            arrival_time: cell(self.arrival_time),
            line_variant_hint: cell(self.line_variant),
            day_descriptor: cell(self.day),
            direction: cell(self.direction),
            trip_key: cell(self.trip_key),
        }
    }
}

/// The whole leg table, in file order.
#[derive(Debug, Clone, Default)]
pub struct LegTable {
    legs: Vec<LegObservation>,
}

impl LegTable {
    /// Read a table from CSV.
    ///
    /// Short rows are accepted; their missing cells read as blank.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnNames) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.byte_headers()?.clone();
        let index = ColumnIndex::locate(&headers, columns)?;

        let mut legs = Vec::new();
        let mut lossy = 0;
        for record in rdr.byte_records() {
            let record = record?;
            if record.iter().any(|cell| std::str::from_utf8(cell).is_err()) {
                lossy += 1;
            }
            legs.push(index.read(&record));
        }

        debug!(rows = legs.len(), lossy, "leg table loaded");
        Ok(Self { legs })
    }

    /// Read a table from a CSV file.
    pub fn from_path(path: &Path, columns: &ColumnNames) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, columns)
    }

    /// Returns all legs.
    pub fn legs(&self) -> &[LegObservation] {
        &self.legs
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Split the table into trip-groups, ordered by key.
    pub fn groups(&self) -> Vec<TripGroup> {
        let mut by_key: BTreeMap<TripGroupKey, Vec<LegObservation>> = BTreeMap::new();
        for leg in &self.legs {
            by_key.entry(leg.group_key()).or_default().push(leg.clone());
        }
        by_key
            .into_iter()
            .map(|(key, legs)| TripGroup { key, legs })
            .collect()
    }
}
