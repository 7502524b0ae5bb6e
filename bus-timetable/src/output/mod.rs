//! Writing the timetable document.

mod dto;
mod viewer;

pub use dto::{BusesDto, DayDto, SectionDto, StopDto, TimetableDocument, TripDto};
pub use viewer::{GroupView, PanelView, TripView, ViewerTemplate};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use askama::Template;
use tracing::debug;

/// Errors writing the output document.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize timetable: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot render viewer: {0}")]
    Render(#[from] askama::Error),
}

impl TimetableDocument {
    /// Serialize as pretty-printed UTF-8 JSON into `writer`.
    ///
    /// Non-ASCII stop names and titles are written as-is, not escaped.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<(), OutputError> {
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        debug!(path = %path.display(), trips = self.trip_count(), "timetable written");
        Ok(())
    }

    /// Render the static viewer page to `path`.
    pub fn write_html(&self, path: &Path, title: &str) -> Result<(), OutputError> {
        let html = ViewerTemplate::from_document(self, title).render()?;
        std::fs::write(path, html).map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "viewer written");
        Ok(())
    }
}
