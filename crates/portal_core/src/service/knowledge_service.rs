//! Knowledge document actions.
//!
//! # Invariants
//! - New ids are max existing id + 1.
//! - `update` and `delete` on an absent id fail with `DocumentNotFound`.

use crate::model::document::{next_document_id, Document, DocumentDraft, DocumentId, DocumentPatch};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for knowledge document actions.
#[derive(Debug)]
pub enum KnowledgeServiceError {
    /// Target document does not exist.
    DocumentNotFound(DocumentId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for KnowledgeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DocumentNotFound(id) => write!(f, "document not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for KnowledgeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::DocumentNotFound(_) => None,
        }
    }
}

impl From<RepoError> for KnowledgeServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type KnowledgeResult<T> = Result<T, KnowledgeServiceError>;

/// Knowledge document service facade.
pub struct KnowledgeService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> KnowledgeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Vec<Document> {
        self.repo.list_documents()
    }

    pub fn get(&self, id: DocumentId) -> Option<Document> {
        self.list().into_iter().find(|document| document.id == id)
    }

    /// Adds a document with the next sequential id.
    pub fn add(&self, draft: DocumentDraft) -> KnowledgeResult<Document> {
        let mut documents = self.repo.load_documents()?;
        let document = Document::from_draft(next_document_id(&documents), draft);
        documents.push(document.clone());
        self.repo.save_documents(&documents)?;

        info!(
            "event=document_add module=service status=ok document_id={}",
            document.id
        );
        Ok(document)
    }

    /// Merges provided fields and returns the updated record.
    pub fn update(&self, id: DocumentId, patch: DocumentPatch) -> KnowledgeResult<Document> {
        let mut documents = self.repo.load_documents()?;
        let Some(document) = documents.iter_mut().find(|document| document.id == id) else {
            warn!(
                "event=document_update module=service status=rejected reason=not_found document_id={id}"
            );
            return Err(KnowledgeServiceError::DocumentNotFound(id));
        };
        document.apply(patch);
        let updated = document.clone();

        self.repo.save_documents(&documents)?;
        info!("event=document_update module=service status=ok document_id={id}");
        Ok(updated)
    }

    pub fn delete(&self, id: DocumentId) -> KnowledgeResult<()> {
        let mut documents = self.repo.load_documents()?;
        let Some(index) = documents.iter().position(|document| document.id == id) else {
            warn!(
                "event=document_delete module=service status=rejected reason=not_found document_id={id}"
            );
            return Err(KnowledgeServiceError::DocumentNotFound(id));
        };
        documents.remove(index);

        self.repo.save_documents(&documents)?;
        info!("event=document_delete module=service status=ok document_id={id}");
        Ok(())
    }
}
