//! Knowledge document model.
//!
//! # Invariants
//! - `id` is unique and assigned as max existing id + 1.
//! - Only `id` is required on read; other missing keys load as empty.

use serde::{Deserialize, Serialize};

/// Numeric document identifier as persisted in `documents.json`.
pub type DocumentId = i64;

/// Shared knowledge article or document link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Serialized as `type` to match the stored file.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub update_time: String,
}

impl Document {
    pub fn from_draft(id: DocumentId, draft: DocumentDraft) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
            kind: draft.kind,
            description: draft.description,
            update_time: draft.update_time,
        }
    }

    /// Merges the provided fields into this record.
    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(update_time) = patch.update_time {
            self.update_time = update_time;
        }
    }
}

/// Document input without identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub url: String,
    pub kind: String,
    pub description: String,
    pub update_time: String,
}

/// Partial document update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub update_time: Option<String>,
}

/// Sequential id assignment: one past the current maximum, starting at 1.
pub fn next_document_id(existing: &[Document]) -> DocumentId {
    existing
        .iter()
        .map(|document| document.id)
        .max()
        .unwrap_or(0)
        .max(0)
        .saturating_add(1)
}
