//! Knowledge document collection repository.

use super::{RepoError, RepoResult};
use crate::model::document::Document;
use crate::store::JsonFileStore;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the documents collection inside the data directory.
pub const DOCUMENTS_FILE_NAME: &str = "documents.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentsFile {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Serialize)]
struct DocumentsFileRef<'a> {
    documents: &'a [Document],
}

/// Repository interface for the documents collection.
pub trait DocumentRepository {
    fn list_documents(&self) -> Vec<Document>;
    fn load_documents(&self) -> RepoResult<Vec<Document>>;
    fn save_documents(&self, documents: &[Document]) -> RepoResult<()>;
}

/// JSON-file-backed documents repository.
#[derive(Debug, Clone)]
pub struct JsonDocumentRepository {
    store: JsonFileStore,
}

impl JsonDocumentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonFileStore::new(path),
        }
    }
}

impl DocumentRepository for JsonDocumentRepository {
    fn list_documents(&self) -> Vec<Document> {
        match self.store.read::<DocumentsFile>() {
            Ok(file) => file.documents,
            Err(err) => {
                warn!(
                    "event=documents_list module=repo status=fallback_empty error_code={}",
                    err.code()
                );
                Vec::new()
            }
        }
    }

    fn load_documents(&self) -> RepoResult<Vec<Document>> {
        match self.store.read::<DocumentsFile>() {
            Ok(file) => Ok(file.documents),
            Err(err) if err.is_missing_file() => Ok(Vec::new()),
            Err(err) => Err(RepoError::Read(err)),
        }
    }

    fn save_documents(&self, documents: &[Document]) -> RepoResult<()> {
        self.store
            .write(&DocumentsFileRef { documents })
            .map_err(RepoError::Write)
    }
}
