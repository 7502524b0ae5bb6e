//! Network configuration.
//!
//! Everything that names a place, a column or a label lives here, so the
//! engine itself only knows about roles (hub, branch termini, capital).
//! The defaults describe the Manresa - Barcelona corridor; a JSON file can
//! override any subset of fields.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{DayTokens, Direction, LineVariant, MINUTES_PER_DAY, RouteSection};

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration JSON
    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Thresholds that cannot describe a midnight crossing
    #[error("invalid midnight thresholds: early_before={early_before}, late_from={late_from}")]
    Thresholds { early_before: u32, late_from: u32 },
}

/// Complete configuration for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub columns: ColumnNames,
    pub days: DayTokens,
    pub directions: DirectionLabels,
    pub variants: VariantLabels,
    pub places: PlaceTokens,
    pub sections: SectionTitles,
    pub midnight: MidnightPolicy,
}

impl NetworkConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.midnight.validate()?;
        Ok(config)
    }
}

/// Header names of the input table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub line_variant: String,
    pub day: String,
    pub direction: String,
    pub departure_stop: String,
    pub departure_time: String,
    pub arrival_stop: String,
    pub arrival_time: String,
    pub trip_key: String,
}

impl ColumnNames {
    /// All required columns, in the order they are reported when missing.
    pub fn required(&self) -> [&str; 8] {
        [
            self.line_variant.as_str(),
            self.day.as_str(),
            self.direction.as_str(),
            self.departure_stop.as_str(),
            self.departure_time.as_str(),
            self.arrival_stop.as_str(),
            self.arrival_time.as_str(),
            self.trip_key.as_str(),
        ]
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            line_variant: "Tipus_bus".into(),
            day: "Tipus_dia".into(),
            direction: "Direccio".into(),
            departure_stop: "Parada_sortida".into(),
            departure_time: "Hora_sortida".into(),
            arrival_stop: "Parada_arribada".into(),
            arrival_time: "Hora_arribada".into(),
            trip_key: "Id_viatge_dia".into(),
        }
    }
}

/// Direction descriptors as written in the table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectionLabels {
    /// Hub to capital
    pub outbound: String,
    /// Capital to hub
    pub inbound: String,
}

impl DirectionLabels {
    /// Match a direction cell (trimmed, case-insensitive).
    pub fn parse(&self, raw: &str) -> Option<Direction> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(self.outbound.trim()) {
            Some(Direction::Outbound)
        } else if raw.eq_ignore_ascii_case(self.inbound.trim()) {
            Some(Direction::Inbound)
        } else {
            None
        }
    }
}

impl Default for DirectionLabels {
    fn default() -> Self {
        Self {
            outbound: "Manresa - Barcelona".into(),
            inbound: "Barcelona - Manresa".into(),
        }
    }
}

/// Line variant tokens. The same text is used to read the declared variant
/// and as the key in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VariantLabels {
    pub primary: String,
    pub branch: String,
    pub generic: String,
}

impl VariantLabels {
    pub fn label(&self, variant: LineVariant) -> &str {
        match variant {
            LineVariant::Primary => &self.primary,
            LineVariant::Branch => &self.branch,
            LineVariant::Generic => &self.generic,
        }
    }
}

impl Default for VariantLabels {
    fn default() -> Self {
        Self {
            primary: "e22".into(),
            branch: "e23".into(),
            generic: "semidirecte".into(),
        }
    }
}

/// Stop-name prefixes identifying the places the rules care about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaceTokens {
    /// Regional hub served by the main line
    pub hub: Vec<String>,
    /// Termini of the branch line
    pub branch_termini: Vec<String>,
    /// Capital endpoint
    pub capital: Vec<String>,
}

impl Default for PlaceTokens {
    fn default() -> Self {
        Self {
            hub: vec!["MANRESA".into()],
            branch_termini: vec!["OLESA".into(), "MONISTROL".into()],
            capital: vec!["BCN".into()],
        }
    }
}

/// Section titles for the output document, plus the viewer page title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SectionTitles {
    pub page: String,
    pub outbound_main: String,
    pub inbound_main: String,
    pub outbound_branch: String,
    pub inbound_branch: String,
}

impl SectionTitles {
    pub fn title(&self, section: RouteSection) -> &str {
        match section {
            RouteSection::OutboundMain => &self.outbound_main,
            RouteSection::InboundMain => &self.inbound_main,
            RouteSection::OutboundBranch => &self.outbound_branch,
            RouteSection::InboundBranch => &self.inbound_branch,
        }
    }
}

impl Default for SectionTitles {
    fn default() -> Self {
        Self {
            page: "Horaris bus Manresa - Barcelona".into(),
            outbound_main: "Manresa → Barcelona".into(),
            inbound_main: "Barcelona → Manresa".into(),
            outbound_branch: "Olesa o Monistrol → Barcelona".into(),
            inbound_branch: "Barcelona → Olesa o Monistrol".into(),
        }
    }
}

/// Thresholds for detecting trips that run past midnight.
///
/// If a trip has calls both before `early_before` and at or after
/// `late_from` (minutes since midnight), the early calls belong to the
/// next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MidnightPolicy {
    pub early_before: u32,
    pub late_from: u32,
}

impl MidnightPolicy {
    /// Check that the early window ends before the late window starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.early_before >= self.late_from || self.late_from >= MINUTES_PER_DAY {
            return Err(ConfigError::Thresholds {
                early_before: self.early_before,
                late_from: self.late_from,
            });
        }
        Ok(())
    }
}

impl Default for MidnightPolicy {
    fn default() -> Self {
        Self {
            early_before: 3 * 60,
            late_from: 20 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = NetworkConfig::default();

        assert_eq!(config.columns.trip_key, "Id_viatge_dia");
        assert_eq!(config.variants.label(LineVariant::Branch), "e23");
        assert_eq!(config.places.branch_termini, vec!["OLESA", "MONISTROL"]);
        assert_eq!(config.midnight.early_before, 180);
        assert_eq!(config.midnight.late_from, 1200);
        assert_eq!(
            config.sections.title(RouteSection::OutboundBranch),
            "Olesa o Monistrol → Barcelona"
        );
    }

    #[test]
    fn required_columns() {
        let columns = ColumnNames::default();
        assert_eq!(
            columns.required(),
            [
                "Tipus_bus",
                "Tipus_dia",
                "Direccio",
                "Parada_sortida",
                "Hora_sortida",
                "Parada_arribada",
                "Hora_arribada",
                "Id_viatge_dia",
            ]
        );
    }

    #[test]
    fn direction_parse() {
        let labels = DirectionLabels::default();
        assert_eq!(labels.parse("Manresa - Barcelona"), Some(Direction::Outbound));
        assert_eq!(labels.parse(" barcelona - manresa "), Some(Direction::Inbound));
        assert_eq!(labels.parse("Manresa - Olesa"), None);
        assert_eq!(labels.parse(""), None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: NetworkConfig =
            serde_json::from_str(r#"{"places": {"capital": ["BARCELONA"]}}"#).unwrap();
        assert_eq!(config.places.capital, vec!["BARCELONA"]);
        assert_eq!(config.places.hub, vec!["MANRESA"]);
        assert_eq!(config.variants, VariantLabels::default());
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"midnight": {{"early_before": 240}}}}"#).unwrap();

        let config = NetworkConfig::from_path(file.path()).unwrap();
        assert_eq!(config.midnight.early_before, 240);
        assert_eq!(config.midnight.late_from, 1200);
    }

    #[test]
    fn from_path_missing_file() {
        let err = NetworkConfig::from_path(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read config"));
    }

    #[test]
    fn from_path_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = NetworkConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn thresholds_must_not_overlap() {
        let policy = MidnightPolicy {
            early_before: 1200,
            late_from: 180,
        };
        assert!(policy.validate().is_err());
        assert!(MidnightPolicy::default().validate().is_ok());

        let err = policy.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid midnight thresholds: early_before=1200, late_from=180"
        );
    }
}
