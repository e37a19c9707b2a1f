//! FFI use-case API for the portal UI shell.
//!
//! # Responsibility
//! - Expose training and knowledge actions to Dart via FRB.
//! - Flatten core errors into response envelopes the UI shows as alerts.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Training deletion re-checks the verification code here, so a UI that
//!   skips its own confirmation still cannot delete without the code.
//! - Configuration is resolved from the environment once per process.

use portal_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, Document, DocumentDraft, DocumentPatch, KnowledgeService,
    KnowledgeServiceError, Material, ParticipantKey, PortalConfig, RepoError, Training,
    TrainingDraft, TrainingPatch, TrainingService, TrainingServiceError, UnavailableRequest,
};
use std::sync::OnceLock;

static PORTAL_CONFIG: OnceLock<PortalConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Input semantics:
/// - `level`: `trace|debug|info|warn|error`; blank uses `PORTAL_LOG_LEVEL`,
///   then the build default.
/// - `log_dir`: absolute directory path for rolling logs.
///
/// # FFI contract
/// - Idempotent for the same arguments; conflicting calls return an error.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        portal_config()
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string())
    } else {
        level
    };
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Material link as shown on a training card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialItem {
    pub name: String,
    pub url: String,
}

/// One unavailable participant row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantItem {
    pub name: String,
    pub department: String,
    pub reason: String,
}

/// Training card payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingItem {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub instructor: String,
    pub location: String,
    pub description: String,
    pub materials: Vec<MaterialItem>,
    pub participants: Vec<ParticipantItem>,
    /// Epoch milliseconds for the "last updated" footer.
    pub updated_at_ms: i64,
}

/// Knowledge document payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentItem {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub kind: String,
    pub description: String,
    pub update_time: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the created or affected record, when there is one.
    pub record_id: Option<i64>,
    /// Human-readable message for the blocking alert.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: Option<i64>) -> Self {
        Self {
            ok: true,
            record_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Lists trainings in calendar order. Never fails; read problems yield empty.
#[flutter_rust_bridge::frb(sync)]
pub fn training_calendar() -> Vec<TrainingItem> {
    training_calendar_with(portal_config())
}

#[flutter_rust_bridge::frb(sync)]
pub fn training_add(
    title: String,
    date: String,
    time: String,
    instructor: String,
    location: String,
    description: String,
    materials: Vec<MaterialItem>,
) -> ActionResponse {
    let draft = TrainingDraft {
        title,
        date,
        time,
        instructor,
        location,
        description,
        materials: materials
            .into_iter()
            .map(|item| Material {
                name: item.name,
                url: item.url,
            })
            .collect(),
    };
    training_add_with(portal_config(), draft)
}

/// Merges the provided fields; `None` keeps the stored value.
#[flutter_rust_bridge::frb(sync)]
pub fn training_update(
    id: i64,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    instructor: Option<String>,
    location: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    let patch = TrainingPatch {
        title,
        date,
        time,
        instructor,
        location,
        description,
    };
    training_update_with(portal_config(), id, patch)
}

/// Deletes a training after checking the verification code.
#[flutter_rust_bridge::frb(sync)]
pub fn training_delete(id: i64, verification_code: String) -> ActionResponse {
    training_delete_with(portal_config(), id, verification_code.as_str())
}

#[flutter_rust_bridge::frb(sync)]
pub fn training_mark_unavailable(
    training_id: i64,
    name: String,
    department: String,
    reason: String,
) -> ActionResponse {
    let request = UnavailableRequest {
        name,
        department,
        reason,
    };
    training_mark_unavailable_with(portal_config(), training_id, request)
}

#[flutter_rust_bridge::frb(sync)]
pub fn training_remove_participant(
    training_id: i64,
    name: String,
    department: String,
) -> ActionResponse {
    let key = ParticipantKey::new(name, department);
    training_remove_participant_with(portal_config(), training_id, key)
}

#[flutter_rust_bridge::frb(sync)]
pub fn document_list() -> Vec<DocumentItem> {
    document_list_with(portal_config())
}

#[flutter_rust_bridge::frb(sync)]
pub fn document_add(
    title: String,
    url: String,
    kind: String,
    description: String,
    update_time: String,
) -> ActionResponse {
    let draft = DocumentDraft {
        title,
        url,
        kind,
        description,
        update_time,
    };
    document_add_with(portal_config(), draft)
}

#[flutter_rust_bridge::frb(sync)]
pub fn document_update(
    id: i64,
    title: Option<String>,
    url: Option<String>,
    kind: Option<String>,
    description: Option<String>,
    update_time: Option<String>,
) -> ActionResponse {
    let patch = DocumentPatch {
        title,
        url,
        kind,
        description,
        update_time,
    };
    document_update_with(portal_config(), id, patch)
}

#[flutter_rust_bridge::frb(sync)]
pub fn document_delete(id: i64) -> ActionResponse {
    document_delete_with(portal_config(), id)
}

fn portal_config() -> &'static PortalConfig {
    PORTAL_CONFIG.get_or_init(PortalConfig::from_env)
}

fn training_service(
    config: &PortalConfig,
) -> TrainingService<portal_core::JsonTrainingRepository> {
    TrainingService::new(config.training_repository())
}

fn knowledge_service(
    config: &PortalConfig,
) -> KnowledgeService<portal_core::JsonDocumentRepository> {
    KnowledgeService::new(config.document_repository())
}

fn training_calendar_with(config: &PortalConfig) -> Vec<TrainingItem> {
    training_service(config)
        .calendar()
        .into_iter()
        .map(to_training_item)
        .collect()
}

fn training_add_with(config: &PortalConfig, draft: TrainingDraft) -> ActionResponse {
    match training_service(config).add(draft) {
        Ok(training) => ActionResponse::success("Training added.", Some(training.id)),
        Err(err) => training_failure("training_add", &err),
    }
}

fn training_update_with(config: &PortalConfig, id: i64, patch: TrainingPatch) -> ActionResponse {
    match training_service(config).update(id, patch) {
        Ok(()) => ActionResponse::success("Training updated.", Some(id)),
        Err(err) => training_failure("training_update", &err),
    }
}

fn training_delete_with(
    config: &PortalConfig,
    id: i64,
    verification_code: &str,
) -> ActionResponse {
    if !config.delete_code.verify(verification_code) {
        log::warn!(
            "event=training_delete module=ffi status=rejected reason=bad_code training_id={id}"
        );
        return ActionResponse::failure("Verification code is incorrect.");
    }
    match training_service(config).delete(id) {
        Ok(()) => ActionResponse::success("Training deleted.", Some(id)),
        Err(err) => training_failure("training_delete", &err),
    }
}

fn training_mark_unavailable_with(
    config: &PortalConfig,
    training_id: i64,
    request: UnavailableRequest,
) -> ActionResponse {
    match training_service(config).mark_unavailable(training_id, request) {
        Ok(()) => ActionResponse::success("Added to the unavailable list.", Some(training_id)),
        Err(err) => training_failure("training_mark_unavailable", &err),
    }
}

fn training_remove_participant_with(
    config: &PortalConfig,
    training_id: i64,
    key: ParticipantKey,
) -> ActionResponse {
    match training_service(config).remove_participant(training_id, key) {
        Ok(()) => ActionResponse::success("Record removed.", Some(training_id)),
        Err(err) => training_failure("training_remove_participant", &err),
    }
}

fn document_list_with(config: &PortalConfig) -> Vec<DocumentItem> {
    knowledge_service(config)
        .list()
        .into_iter()
        .map(to_document_item)
        .collect()
}

fn document_add_with(config: &PortalConfig, draft: DocumentDraft) -> ActionResponse {
    match knowledge_service(config).add(draft) {
        Ok(document) => ActionResponse::success("Document added.", Some(document.id)),
        Err(err) => document_failure("document_add", &err),
    }
}

fn document_update_with(config: &PortalConfig, id: i64, patch: DocumentPatch) -> ActionResponse {
    match knowledge_service(config).update(id, patch) {
        Ok(document) => ActionResponse::success("Document updated.", Some(document.id)),
        Err(err) => document_failure("document_update", &err),
    }
}

fn document_delete_with(config: &PortalConfig, id: i64) -> ActionResponse {
    match knowledge_service(config).delete(id) {
        Ok(()) => ActionResponse::success("Document deleted.", Some(id)),
        Err(err) => document_failure("document_delete", &err),
    }
}

const STORAGE_FAILURE_MESSAGE: &str = "Could not save changes, please retry.";

// Duplicate/not-found messages go to the user verbatim. Storage faults carry
// file paths and parser output, so the alert stays generic and the detail
// goes to the log.
fn training_failure(operation: &str, err: &TrainingServiceError) -> ActionResponse {
    match err {
        TrainingServiceError::Repo(repo_err) => storage_failure(operation, repo_err),
        other => ActionResponse::failure(other.to_string()),
    }
}

fn document_failure(operation: &str, err: &KnowledgeServiceError) -> ActionResponse {
    match err {
        KnowledgeServiceError::Repo(repo_err) => storage_failure(operation, repo_err),
        other => ActionResponse::failure(other.to_string()),
    }
}

fn storage_failure(operation: &str, err: &RepoError) -> ActionResponse {
    log::error!("event={operation} module=ffi status=error error={err}");
    ActionResponse::failure(STORAGE_FAILURE_MESSAGE)
}

fn to_training_item(training: Training) -> TrainingItem {
    let updated_at_ms = training.display_timestamp();
    TrainingItem {
        id: training.id,
        title: training.title,
        date: training.date,
        time: training.time,
        instructor: training.instructor,
        location: training.location,
        description: training.description,
        materials: training
            .materials
            .into_iter()
            .map(|material| MaterialItem {
                name: material.name,
                url: material.url,
            })
            .collect(),
        participants: training
            .participants
            .into_iter()
            .map(|participant| ParticipantItem {
                name: participant.name,
                department: participant.department,
                reason: participant.reason,
            })
            .collect(),
        updated_at_ms,
    }
}

fn to_document_item(document: Document) -> DocumentItem {
    DocumentItem {
        id: document.id,
        title: document.title,
        url: document.url,
        kind: document.kind,
        description: document.description,
        update_time: document.update_time,
    }
}
