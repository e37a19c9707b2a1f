//! Training page state machine.
//!
//! # Responsibility
//! - Hold the loaded collection plus selection, open form and expanded row.
//! - Turn discrete user events into action calls and user-facing notices.
//!
//! # Invariants
//! - At most one form is open; at most one record is expanded.
//! - A successful submit closes the form and reloads the whole collection.
//! - A failed submit keeps the form open with its input intact.
//! - A wrong deletion code never reaches the action layer.

use super::Notice;
use crate::config::DeleteCode;
use crate::model::training::{
    ParticipantKey, Training, TrainingDraft, TrainingId, TrainingPatch, UnavailableRequest,
};
use crate::repo::training_repo::TrainingRepository;
use crate::service::training_service::{sort_for_calendar, TrainingService, TrainingServiceError};
use log::debug;

/// Form currently open on the training page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingForm {
    Add(TrainingDraft),
    Edit {
        training_id: TrainingId,
        fields: TrainingDraft,
    },
    MarkUnavailable {
        training_id: TrainingId,
        request: UnavailableRequest,
    },
    RemoveParticipant {
        training_id: TrainingId,
        key: ParticipantKey,
    },
    DeleteConfirm {
        training_id: TrainingId,
        code: String,
    },
}

impl TrainingForm {
    fn label(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Edit { .. } => "edit",
            Self::MarkUnavailable { .. } => "mark_unavailable",
            Self::RemoveParticipant { .. } => "remove_participant",
            Self::DeleteConfirm { .. } => "delete_confirm",
        }
    }
}

/// Per-page view state for the training calendar.
#[derive(Debug, Clone)]
pub struct TrainingView {
    trainings: Vec<Training>,
    selected: Option<TrainingId>,
    form: Option<TrainingForm>,
    expanded: Option<TrainingId>,
    delete_code: DeleteCode,
}

impl TrainingView {
    pub fn new(delete_code: DeleteCode) -> Self {
        Self {
            trainings: Vec::new(),
            selected: None,
            form: None,
            expanded: None,
            delete_code,
        }
    }

    /// Replaces the held collection with a fresh read of the store.
    pub fn load<R: TrainingRepository>(&mut self, service: &TrainingService<R>) {
        self.trainings = service.list();
        if let Some(id) = self.expanded {
            if !self.contains(id) {
                self.expanded = None;
            }
        }
        debug!(
            "event=training_view_load module=view status=ok total={}",
            self.trainings.len()
        );
    }

    pub fn trainings(&self) -> &[Training] {
        &self.trainings
    }

    /// Loaded trainings in calendar order.
    pub fn calendar(&self) -> Vec<Training> {
        let mut trainings = self.trainings.clone();
        sort_for_calendar(&mut trainings);
        trainings
    }

    pub fn selected(&self) -> Option<&Training> {
        self.selected.and_then(|id| self.find(id))
    }

    pub fn form(&self) -> Option<&TrainingForm> {
        self.form.as_ref()
    }

    /// Mutable access for binding form inputs.
    pub fn form_mut(&mut self) -> Option<&mut TrainingForm> {
        self.form.as_mut()
    }

    pub fn expanded(&self) -> Option<TrainingId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: TrainingId) -> bool {
        self.expanded == Some(id)
    }

    /// Expands `id`, collapsing any other record; collapses it if expanded.
    pub fn toggle_expanded(&mut self, id: TrainingId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn open_add(&mut self) {
        self.selected = None;
        self.form = Some(TrainingForm::Add(TrainingDraft::default()));
    }

    /// Opens the edit form prefilled from the loaded record.
    ///
    /// Returns `false` when the id is not in the loaded collection.
    pub fn open_edit(&mut self, training_id: TrainingId) -> bool {
        let Some(training) = self.find(training_id) else {
            return false;
        };
        let fields = TrainingDraft::from_training(training);
        self.open_for(
            training_id,
            TrainingForm::Edit {
                training_id,
                fields,
            },
        );
        true
    }

    pub fn open_mark_unavailable(&mut self, training_id: TrainingId) -> bool {
        if !self.contains(training_id) {
            return false;
        }
        self.open_for(
            training_id,
            TrainingForm::MarkUnavailable {
                training_id,
                request: UnavailableRequest::default(),
            },
        );
        true
    }

    /// Asks for confirmation before removing one participant record.
    pub fn open_remove_participant(
        &mut self,
        training_id: TrainingId,
        key: ParticipantKey,
    ) -> bool {
        if !self.contains(training_id) {
            return false;
        }
        self.open_for(
            training_id,
            TrainingForm::RemoveParticipant { training_id, key },
        );
        true
    }

    /// Opens the deletion dialog with an empty code input.
    pub fn open_delete_confirm(&mut self, training_id: TrainingId) -> bool {
        if !self.contains(training_id) {
            return false;
        }
        self.open_for(
            training_id,
            TrainingForm::DeleteConfirm {
                training_id,
                code: String::new(),
            },
        );
        true
    }

    /// Updates the code typed into an open deletion dialog.
    pub fn set_delete_code_input(&mut self, input: impl Into<String>) {
        if let Some(TrainingForm::DeleteConfirm { code, .. }) = self.form.as_mut() {
            *code = input.into();
        }
    }

    /// Closes any open form and clears the selection.
    pub fn cancel(&mut self) {
        self.form = None;
        self.selected = None;
    }

    /// Submits the open form.
    ///
    /// The returned notice stands in for the blocking alert shown to the user.
    pub fn submit<R: TrainingRepository>(&mut self, service: &TrainingService<R>) -> Notice {
        let Some(form) = self.form.take() else {
            return Notice::error("Nothing to submit.");
        };
        let label = form.label();

        let outcome = match &form {
            TrainingForm::Add(draft) => service
                .add(draft.clone())
                .map(|_| "Training added.")
                .map_err(|err| failure_message(&err, "Failed to add training, please retry.")),
            TrainingForm::Edit {
                training_id,
                fields,
            } => service
                .update(*training_id, TrainingPatch::from_draft(fields))
                .map(|()| "Training updated.")
                .map_err(|err| failure_message(&err, "Update failed, please retry.")),
            TrainingForm::MarkUnavailable {
                training_id,
                request,
            } => service
                .mark_unavailable(*training_id, request.clone())
                .map(|()| "Added to the unavailable list.")
                .map_err(|err| failure_message(&err, "Operation failed, please retry.")),
            TrainingForm::RemoveParticipant { training_id, key } => service
                .remove_participant(*training_id, key.clone())
                .map(|()| "Record removed.")
                .map_err(|err| failure_message(&err, "Removal failed, please retry.")),
            TrainingForm::DeleteConfirm { training_id, code } => {
                if self.delete_code.verify(code) {
                    service
                        .delete(*training_id)
                        .map(|()| "Training deleted.")
                        .map_err(|err| {
                            failure_message(&err, "Failed to delete training, please retry.")
                        })
                } else {
                    Err("Verification code is incorrect.".to_string())
                }
            }
        };

        match outcome {
            Ok(message) => {
                debug!("event=training_view_submit module=view status=ok form={label}");
                self.selected = None;
                self.load(service);
                Notice::info(message)
            }
            Err(message) => {
                debug!("event=training_view_submit module=view status=error form={label}");
                self.form = Some(form);
                Notice::error(message)
            }
        }
    }

    fn open_for(&mut self, training_id: TrainingId, form: TrainingForm) {
        self.selected = Some(training_id);
        self.form = Some(form);
    }

    fn find(&self, id: TrainingId) -> Option<&Training> {
        self.trainings.iter().find(|training| training.id == id)
    }

    fn contains(&self, id: TrainingId) -> bool {
        self.find(id).is_some()
    }
}

// Semantic failures carry their own message; storage faults get the generic one.
fn failure_message(err: &TrainingServiceError, generic: &str) -> String {
    match err {
        TrainingServiceError::Repo(_) => generic.to_string(),
        other => other.to_string(),
    }
}
