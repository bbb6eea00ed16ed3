//! Error taxonomy for the dashboard.
//!
//! Only [`DashboardError::CatalogUnavailable`] is session-fatal; every other
//! variant blocks the current render cycle and leaves the UI usable for a
//! different year/theme selection.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::YearLabel;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("data directory {} is missing or unreadable: {source}", .directory.display())]
    CatalogUnavailable {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no dataset for year {year} (expected {})", .path.display())]
    SnapshotNotFound { year: YearLabel, path: PathBuf },

    #[error("dataset for year {year} could not be parsed: {message}")]
    SnapshotMalformed { year: YearLabel, message: String },

    #[error("dataset is missing required columns: {}", .missing.join(", "))]
    SnapshotIncomplete { missing: Vec<String> },

    #[error("dataset contains no rows")]
    EmptySnapshot,
}

impl DashboardError {
    pub fn malformed(year: YearLabel, err: impl std::fmt::Display) -> Self {
        Self::SnapshotMalformed {
            year,
            message: err.to_string(),
        }
    }

    /// Whether this error aborts the whole session rather than one render.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::CatalogUnavailable { .. })
    }
}
