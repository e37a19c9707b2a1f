//! Repository layer over the JSON collection stores.
//!
//! # Responsibility
//! - Define collection-level data access contracts (load/list/save).
//! - Isolate file layout and envelope shapes from the action services.
//!
//! # Invariants
//! - `list_*` never fails: read problems are logged and yield empty.
//! - `load_*` is strict: only a missing file yields empty, so mutating
//!   actions never overwrite a corrupt store.
//! - `save_*` rewrites the whole collection.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod document_repo;
pub mod training_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic persistence failure surfaced to action callers.
#[derive(Debug)]
pub enum RepoError {
    /// The collection could not be read for a mutation.
    Read(StoreError),
    /// The collection could not be written back.
    Write(StoreError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read collection: {err}"),
            Self::Write(err) => write!(f, "failed to save collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
        }
    }
}
