//! One batch run: table in, timetable document out.

use std::path::PathBuf;

use tracing::info;

use crate::config::{ConfigError, NetworkConfig};
use crate::engine::{BuildStats, build_timetable};
use crate::output::{OutputError, TimetableDocument};
use crate::table::{LegTable, TableError};

/// Inputs of a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Origin-destination CSV table
    pub input: PathBuf,
    /// Where the JSON document is written
    pub output: PathBuf,
    /// Optional JSON network configuration; defaults are used when absent
    pub config: Option<PathBuf>,
    /// Also render the static HTML viewer here
    pub html: Option<PathBuf>,
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub stats: BuildStats,
    pub output: PathBuf,
    pub html: Option<PathBuf>,
}

/// Load, build and write.
pub fn run(options: &RunOptions) -> Result<RunSummary, AppError> {
    let config = match &options.config {
        Some(path) => NetworkConfig::from_path(path)?,
        None => NetworkConfig::default(),
    };

    let table = LegTable::from_path(&options.input, &config.columns)?;
    let groups = table.groups();
    info!(
        input = %options.input.display(),
        rows = table.len(),
        groups = groups.len(),
        "table loaded"
    );

    let (timetable, stats) = build_timetable(&groups, &config);
    if stats.needs_review > 0 {
        info!(trips = stats.needs_review, "some trips need manual review, see warnings above");
    }

    let document = TimetableDocument::from_timetable(&timetable, &config);
    document.write_json(&options.output)?;
    info!(
        output = %options.output.display(),
        entries = stats.entries,
        omitted = stats.omitted(),
        "timetable written"
    );

    if let Some(html) = &options.html {
        document.write_html(html, &config.sections.page)?;
        info!(html = %html.display(), "viewer written");
    }

    Ok(RunSummary {
        rows: table.len(),
        stats,
        output: options.output.clone(),
        html: options.html.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const CSV: &str = "\
Tipus_bus,Tipus_dia,Direccio,Parada_sortida,Hora_sortida,Parada_arribada,Hora_arribada,Id_viatge_dia
e23,Dilluns a divendres feiners,Manresa - Barcelona,Manresa,6.30,Olesa,7.00,1
e23,Dilluns a divendres feiners,Manresa - Barcelona,Manresa,6.30,BCN Pl. Espanya,7.45,1
e23,Dilluns a divendres feiners,Manresa - Barcelona,Olesa,7.00,Abrera,7.10,1
e22,Dilluns a divendres feiners,Manresa - Barcelona,Manresa,8.00,BCN Sants,9.05,2
e22,Diumenges,Barcelona - Manresa,BCN Sants,23.50,Manresa,0.55,3
semidirecte,Dissabtes,Barcelona - Manresa,BCN Sants,10.00,-,-,4
";

    fn write_input(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("horaris.csv");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn options(dir: &TempDir, input: PathBuf) -> RunOptions {
        RunOptions {
            input,
            output: dir.path().join("data.json"),
            config: None,
            html: None,
        }
    }

    #[test]
    fn end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, CSV);
        let summary = run(&options(&dir, input)).unwrap();

        assert_eq!(summary.rows, 6);
        assert_eq!(summary.stats.groups, 4);
        assert_eq!(summary.stats.entries, 4);
        assert_eq!(summary.stats.branch_entries, 1);
        assert_eq!(summary.stats.too_few_stops, 1);

        let text = std::fs::read_to_string(&summary.output).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        let m2b = &json["sections"][0];
        assert_eq!(m2b["id"], "m2b");
        let weekday = &m2b["days"][0]["buses"];
        assert_eq!(weekday["e22"][0]["trip_id"], 2);
        assert_eq!(weekday["semidirecte"][0]["trip_id"], 1);
        assert_eq!(weekday["semidirecte"][0]["stops"].as_array().unwrap().len(), 4);

        let o2b = &json["sections"][2]["days"][0]["buses"];
        assert_eq!(o2b["e23"][0]["start_time"], "07:00");
        assert_eq!(o2b["e23"][0]["end_time"], "07:45");

        let b2m_sunday = &json["sections"][1]["days"][2]["buses"];
        assert_eq!(b2m_sunday["e22"][0]["start_time"], "23:50");
        assert_eq!(b2m_sunday["e22"][0]["end_time"], "00:55");
        assert!(summary.html.is_none());
    }

    #[test]
    fn writes_viewer_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, CSV);
        let opts = RunOptions {
            html: Some(dir.path().join("index.html")),
            ..options(&dir, input)
        };
        let summary = run(&opts).unwrap();

        let path = summary.html.unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("<title>Horaris bus Manresa - Barcelona</title>"));
        assert!(html.contains("Servei E 22. Sortida 08:00. Arribada 09:05."));
        assert!(html.contains("Recorregut: 07:00 Olesa; 07:10 Abrera; 07:45 BCN Pl. Espanya."));
        assert!(dir.path().join("data.json").exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&options(&dir, dir.path().join("nope.csv"))).unwrap_err();
        assert!(matches!(err, AppError::Table(TableError::NotFound(_))));
        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn missing_columns_abort_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "Tipus_bus,Tipus_dia\ne22,Diumenges\n");
        let err = run(&options(&dir, input)).unwrap_err();

        assert!(matches!(err, AppError::Table(TableError::MissingColumns(_))));
        assert!(err.to_string().starts_with("missing required columns: Direccio"));
        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn config_file_overrides_labels() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, CSV);

        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"variants": {{"primary": "e22", "branch": "e23", "generic": "altres"}}}}"#)
            .unwrap();

        let opts = RunOptions {
            config: Some(config.path().to_path_buf()),
            ..options(&dir, input)
        };
        let summary = run(&opts).unwrap();

        let text = std::fs::read_to_string(&summary.output).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["sections"][0]["busTypeOrder"][1], "altres");
        assert_eq!(json["sections"][0]["days"][0]["buses"]["altres"][0]["trip_id"], 1);
    }

    #[test]
    fn bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, CSV);

        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"midnight": {{"early_before": 1300, "late_from": 1200}}}}"#).unwrap();

        let opts = RunOptions {
            config: Some(config.path().to_path_buf()),
            ..options(&dir, input)
        };
        let err = run(&opts).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Thresholds { .. })));
    }
}
