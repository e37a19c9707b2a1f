//! Core domain logic for the group portal.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{ConfigError, DeleteCode, PortalConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{Document, DocumentDraft, DocumentId, DocumentPatch};
pub use model::training::{
    Material, Participant, ParticipantKey, ParticipantStatus, Training, TrainingDraft, TrainingId,
    TrainingPatch, UnavailableRequest,
};
pub use repo::document_repo::{DocumentRepository, JsonDocumentRepository};
pub use repo::training_repo::{JsonTrainingRepository, TrainingRepository};
pub use repo::{RepoError, RepoResult};
pub use service::knowledge_service::{KnowledgeService, KnowledgeServiceError};
pub use service::training_service::{TrainingService, TrainingServiceError};
pub use store::{JsonFileStore, StoreError};
pub use view::training_view::{TrainingForm, TrainingView};
pub use view::{Notice, NoticeKind};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
