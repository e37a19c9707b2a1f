//! Training calendar domain model.
//!
//! # Responsibility
//! - Define the training session record and its embedded participant list.
//! - Own the participant-pair uniqueness rule shared by every write path.
//!
//! # Invariants
//! - `id` is unique within one trainings collection.
//! - `(name, department)` is unique within one training's participant list.
//! - `created_at` is display metadata only and never used as identity.
//! - Only `id` is required on read; hand-edited records missing other keys
//!   load with empty values instead of hiding the whole collection.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Numeric training identifier as persisted in `trainings.json`.
pub type TrainingId = i64;

/// Attendance marker for a participant sub-record.
///
/// The portal only records people who cannot attend, so this has a single
/// variant today. Kept as an enum to make the wire value explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    #[default]
    Unavailable,
}

/// Course material link attached to a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub url: String,
}

/// One person marked as unable to attend a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub status: ParticipantStatus,
    #[serde(default)]
    pub reason: String,
}

impl Participant {
    /// Returns whether this participant matches the given identity pair.
    pub fn matches(&self, key: &ParticipantKey) -> bool {
        self.name == key.name && self.department == key.department
    }
}

/// Identity pair of a participant inside one training.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantKey {
    pub name: String,
    pub department: String,
}

impl ParticipantKey {
    pub fn new(name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
        }
    }
}

/// Input for marking one person unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnavailableRequest {
    pub name: String,
    pub department: String,
    pub reason: String,
}

impl UnavailableRequest {
    pub fn key(&self) -> ParticipantKey {
        ParticipantKey::new(self.name.clone(), self.department.clone())
    }

    /// Converts the request into a stored participant record.
    pub fn into_participant(self) -> Participant {
        Participant {
            name: self.name,
            department: self.department,
            status: ParticipantStatus::Unavailable,
            reason: self.reason,
        }
    }
}

/// Canonical training session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: TrainingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Unix epoch milliseconds of creation. Absent on legacy records whose
    /// id doubled as the creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Training {
    /// Builds a stored record from a draft with an already assigned id.
    pub fn from_draft(id: TrainingId, draft: TrainingDraft, created_at: i64) -> Self {
        Self {
            id,
            title: draft.title,
            date: draft.date,
            time: draft.time,
            instructor: draft.instructor,
            location: draft.location,
            description: draft.description,
            materials: draft.materials,
            participants: Vec::new(),
            created_at: Some(created_at),
        }
    }

    /// Returns whether a participant with this identity pair is listed.
    pub fn has_participant(&self, key: &ParticipantKey) -> bool {
        self.participants.iter().any(|p| p.matches(key))
    }

    /// Appends an unavailable participant unless the pair is already listed.
    ///
    /// Returns `false` and leaves the list untouched on a duplicate pair.
    pub fn add_participant(&mut self, request: UnavailableRequest) -> bool {
        if self.has_participant(&request.key()) {
            return false;
        }
        self.participants.push(request.into_participant());
        true
    }

    /// Removes the first participant matching the pair.
    ///
    /// Returns the removed record, or `None` when no participant matched.
    pub fn remove_participant(&mut self, key: &ParticipantKey) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.matches(key))?;
        Some(self.participants.remove(index))
    }

    /// Merges the provided fields into this record.
    pub fn apply(&mut self, patch: TrainingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(instructor) = patch.instructor {
            self.instructor = instructor;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }

    /// Timestamp suitable for "last updated" display.
    ///
    /// Falls back to the id for legacy records created before `created_at`
    /// existed, when ids were minted from the clock.
    pub fn display_timestamp(&self) -> i64 {
        self.created_at.unwrap_or(self.id)
    }
}

/// Training input without identity, used by the add action and add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub instructor: String,
    pub location: String,
    pub description: String,
    pub materials: Vec<Material>,
}

impl TrainingDraft {
    /// Prefills an edit form from a stored record.
    pub fn from_training(training: &Training) -> Self {
        Self {
            title: training.title.clone(),
            date: training.date.clone(),
            time: training.time.clone(),
            instructor: training.instructor.clone(),
            location: training.location.clone(),
            description: training.description.clone(),
            materials: training.materials.clone(),
        }
    }
}

/// Partial update for the editable scalar fields of a training.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl TrainingPatch {
    /// Full replacement of every editable field, as submitted by the edit form.
    pub fn from_draft(draft: &TrainingDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            date: Some(draft.date.clone()),
            time: Some(draft.time.clone()),
            instructor: Some(draft.instructor.clone()),
            location: Some(draft.location.clone()),
            description: Some(draft.description.clone()),
        }
    }
}

/// Returns current Unix epoch milliseconds, or `0` if the clock is before
/// the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Picks the next training id for a collection.
///
/// Ids are strictly greater than every existing id and never below `now_ms`,
/// which keeps new ids ordered after legacy clock-derived ones while staying
/// unique under rapid successive calls.
pub fn next_training_id(existing: &[Training], now_ms: i64) -> TrainingId {
    let after_max = existing
        .iter()
        .map(|training| training.id)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    after_max.max(now_ms)
}

#[cfg(test)]
mod tests {
    use super::{next_training_id, Training, TrainingDraft};

    fn training(id: i64) -> Training {
        Training::from_draft(id, TrainingDraft::default(), 0)
    }

    #[test]
    fn next_id_uses_clock_for_empty_collection() {
        assert_eq!(next_training_id(&[], 1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn next_id_steps_past_max_when_clock_lags() {
        let existing = vec![training(5), training(1_700_000_000_010), training(7)];
        assert_eq!(
            next_training_id(&existing, 1_700_000_000_000),
            1_700_000_000_011
        );
    }

    #[test]
    fn display_timestamp_falls_back_to_id() {
        let mut legacy = training(1_710_000_000_000);
        legacy.created_at = None;
        assert_eq!(legacy.display_timestamp(), 1_710_000_000_000);
    }
}
