use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// A calendar-day string that is not in `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid calendar date {input:?}, expected YYYY-MM-DD")]
pub struct DateError {
    pub input: String,
}

/// Failures when building or mutating a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project range is inverted: start {start} is after due {due}")]
    InvertedRange { start: NaiveDate, due: NaiveDate },

    #[error("no task with id {0:?}")]
    UnknownTask(String),

    #[error(transparent)]
    Date(#[from] DateError),
}

/// Failures reading or writing project documents and settings.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode project: {0}")]
    Encode(#[from] serde_json::Error),
}
