//! Training collection repository.
//!
//! # Responsibility
//! - Map `{ "trainings": [...] }` files to `Vec<Training>`.
//! - Provide the swallow-on-failure `list` used by page loads.
//!
//! # See also
//! - `crate::store::JsonFileStore`

use super::{RepoError, RepoResult};
use crate::model::training::Training;
use crate::store::JsonFileStore;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the trainings collection inside the data directory.
pub const TRAININGS_FILE_NAME: &str = "trainings.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrainingsFile {
    #[serde(default)]
    trainings: Vec<Training>,
}

#[derive(Serialize)]
struct TrainingsFileRef<'a> {
    trainings: &'a [Training],
}

/// Repository interface for the trainings collection.
pub trait TrainingRepository {
    /// Reads every training; any read/parse failure yields an empty list.
    fn list_trainings(&self) -> Vec<Training>;
    /// Reads every training for a read-modify-write cycle.
    fn load_trainings(&self) -> RepoResult<Vec<Training>>;
    /// Replaces the stored collection with `trainings`.
    fn save_trainings(&self, trainings: &[Training]) -> RepoResult<()>;
}

/// JSON-file-backed trainings repository.
#[derive(Debug, Clone)]
pub struct JsonTrainingRepository {
    store: JsonFileStore,
}

impl JsonTrainingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonFileStore::new(path),
        }
    }
}

impl TrainingRepository for JsonTrainingRepository {
    fn list_trainings(&self) -> Vec<Training> {
        match self.store.read::<TrainingsFile>() {
            Ok(file) => file.trainings,
            Err(err) => {
                warn!(
                    "event=trainings_list module=repo status=fallback_empty error_code={}",
                    err.code()
                );
                Vec::new()
            }
        }
    }

    fn load_trainings(&self) -> RepoResult<Vec<Training>> {
        match self.store.read::<TrainingsFile>() {
            Ok(file) => Ok(file.trainings),
            Err(err) if err.is_missing_file() => Ok(Vec::new()),
            Err(err) => Err(RepoError::Read(err)),
        }
    }

    fn save_trainings(&self, trainings: &[Training]) -> RepoResult<()> {
        self.store
            .write(&TrainingsFileRef { trainings })
            .map_err(RepoError::Write)
    }
}
