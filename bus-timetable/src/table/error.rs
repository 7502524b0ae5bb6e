//! Leg table error types.

use std::path::PathBuf;

/// Errors that stop a table from being loaded at all.
///
/// Problems inside individual cells are never errors; they are skipped
/// during reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Input file does not exist
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax or encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header lacks columns the engine needs
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
