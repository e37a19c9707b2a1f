//! JSON file storage for portal collections.
//!
//! # Responsibility
//! - Read and write one whole JSON document per collection file.
//! - Translate filesystem and serde failures into `StoreError`.
//!
//! # Invariants
//! - Files are written pretty-printed, UTF-8, two-space indent.
//! - A write replaces the file wholesale via temp file + rename; readers
//!   never see a partially written document.
//! - No locking: concurrent writers race and the last rename wins.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure while reading or writing `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File exists but does not hold the expected JSON shape.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// In-memory value could not be rendered as JSON.
    Serialize(serde_json::Error),
}

impl StoreError {
    /// Returns whether the failure means the file simply does not exist yet.
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "store_io_failed",
            Self::Parse { .. } => "store_parse_failed",
            Self::Serialize(_) => "store_serialize_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store I/O failed for `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "store file `{}` is not valid: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize store content: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}
