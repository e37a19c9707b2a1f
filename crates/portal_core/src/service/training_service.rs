//! Training calendar actions.
//!
//! # Responsibility
//! - Provide the read-modify-write actions behind the training page.
//! - Enforce participant-pair uniqueness and surface semantic failures.
//!
//! # Invariants
//! - Every mutating action is one full load, one in-memory change and one
//!   full save. Nothing is saved when the action fails.
//! - `delete` and `update` on an absent id are no-ops, not errors.
//! - `calendar` ordering is by `date` ascending, stable, unparseable last.

use crate::model::training::{
    next_training_id, now_epoch_ms, ParticipantKey, Training, TrainingDraft, TrainingId,
    TrainingPatch, UnavailableRequest,
};
use crate::repo::training_repo::TrainingRepository;
use crate::repo::RepoError;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CALENDAR_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})-(\d{1,2})-(\d{1,2})").expect("valid date regex"));

/// Service error for training actions.
#[derive(Debug)]
pub enum TrainingServiceError {
    /// Target training does not exist.
    TrainingNotFound(TrainingId),
    /// The (name, department) pair is already listed on the training.
    DuplicateParticipant {
        training_id: TrainingId,
        key: ParticipantKey,
    },
    /// No participant with the (name, department) pair is listed.
    ParticipantNotFound {
        training_id: TrainingId,
        key: ParticipantKey,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl TrainingServiceError {
    /// Whether the error names a missing record rather than a storage fault.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TrainingNotFound(_) | Self::ParticipantNotFound { .. }
        )
    }
}

impl Display for TrainingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrainingNotFound(id) => write!(f, "training not found: {id}"),
            Self::DuplicateParticipant { key, .. } => write!(
                f,
                "{} ({}) is already on the unavailable list",
                key.name, key.department
            ),
            Self::ParticipantNotFound { key, .. } => write!(
                f,
                "no unavailable record for {} ({})",
                key.name, key.department
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrainingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TrainingServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type TrainingResult<T> = Result<T, TrainingServiceError>;

/// Training action facade over repository implementations.
pub struct TrainingService<R: TrainingRepository> {
    repo: R,
}

impl<R: TrainingRepository> TrainingService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists all trainings in stored order. Never fails.
    pub fn list(&self) -> Vec<Training> {
        self.repo.list_trainings()
    }

    /// Lists all trainings ordered for the calendar view.
    pub fn calendar(&self) -> Vec<Training> {
        let mut trainings = self.list();
        sort_for_calendar(&mut trainings);
        trainings
    }

    /// Gets one training by id.
    pub fn get(&self, id: TrainingId) -> Option<Training> {
        self.list().into_iter().find(|training| training.id == id)
    }

    /// Adds a training and returns the stored record with its new id.
    pub fn add(&self, draft: TrainingDraft) -> TrainingResult<Training> {
        let mut trainings = self.repo.load_trainings()?;
        let now_ms = now_epoch_ms();
        let training = Training::from_draft(next_training_id(&trainings, now_ms), draft, now_ms);
        trainings.push(training.clone());
        self.repo.save_trainings(&trainings)?;

        info!(
            "event=training_add module=service status=ok training_id={} total={}",
            training.id,
            trainings.len()
        );
        Ok(training)
    }

    /// Deletes a training by id. Absent ids leave the store untouched.
    pub fn delete(&self, id: TrainingId) -> TrainingResult<()> {
        let mut trainings = self.repo.load_trainings()?;
        let before = trainings.len();
        trainings.retain(|training| training.id != id);
        if trainings.len() == before {
            info!("event=training_delete module=service status=noop training_id={id}");
            return Ok(());
        }

        self.repo.save_trainings(&trainings)?;
        info!("event=training_delete module=service status=ok training_id={id}");
        Ok(())
    }

    /// Merges provided fields into a training. Absent ids are a no-op.
    pub fn update(&self, id: TrainingId, patch: TrainingPatch) -> TrainingResult<()> {
        let mut trainings = self.repo.load_trainings()?;
        let Some(training) = trainings.iter_mut().find(|training| training.id == id) else {
            info!("event=training_update module=service status=noop training_id={id}");
            return Ok(());
        };
        training.apply(patch);

        self.repo.save_trainings(&trainings)?;
        info!("event=training_update module=service status=ok training_id={id}");
        Ok(())
    }

    /// Marks one person unavailable for a training.
    pub fn mark_unavailable(
        &self,
        training_id: TrainingId,
        request: UnavailableRequest,
    ) -> TrainingResult<()> {
        let mut trainings = self.repo.load_trainings()?;
        let training = trainings
            .iter_mut()
            .find(|training| training.id == training_id)
            .ok_or(TrainingServiceError::TrainingNotFound(training_id))?;

        let key = request.key();
        if !training.add_participant(request) {
            warn!(
                "event=training_mark_unavailable module=service status=rejected reason=duplicate training_id={training_id}"
            );
            return Err(TrainingServiceError::DuplicateParticipant { training_id, key });
        }
        let count = training.participants.len();

        self.repo.save_trainings(&trainings)?;
        info!(
            "event=training_mark_unavailable module=service status=ok training_id={training_id} participants={count}"
        );
        Ok(())
    }

    /// Removes the first participant matching the pair.
    pub fn remove_participant(
        &self,
        training_id: TrainingId,
        key: ParticipantKey,
    ) -> TrainingResult<()> {
        let mut trainings = self.repo.load_trainings()?;
        let removed = trainings
            .iter_mut()
            .find(|training| training.id == training_id)
            .and_then(|training| training.remove_participant(&key));
        if removed.is_none() {
            warn!(
                "event=training_remove_participant module=service status=rejected reason=not_found training_id={training_id}"
            );
            return Err(TrainingServiceError::ParticipantNotFound { training_id, key });
        }

        self.repo.save_trainings(&trainings)?;
        info!(
            "event=training_remove_participant module=service status=ok training_id={training_id}"
        );
        Ok(())
    }
}

/// Sorts trainings by calendar date ascending.
///
/// Dates are read as `YYYY-MM-DD` prefixes. Records whose date does not
/// parse keep their relative order after every dated record.
pub fn sort_for_calendar(trainings: &mut [Training]) {
    trainings.sort_by_key(|training| calendar_key(&training.date));
}

fn calendar_key(date: &str) -> (bool, u32, u32, u32) {
    let parsed = CALENDAR_DATE_RE.captures(date).and_then(|caps| {
        let year = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let month = caps.get(2)?.as_str().parse::<u32>().ok()?;
        let day = caps.get(3)?.as_str().parse::<u32>().ok()?;
        Some((year, month, day))
    });
    match parsed {
        Some((year, month, day)) => (false, year, month, day),
        None => (true, 0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_key, sort_for_calendar};
    use crate::model::training::{Training, TrainingDraft};

    fn dated(id: i64, date: &str) -> Training {
        Training::from_draft(
            id,
            TrainingDraft {
                date: date.to_string(),
                ..TrainingDraft::default()
            },
            0,
        )
    }

    #[test]
    fn calendar_key_reads_unpadded_dates() {
        assert_eq!(calendar_key("2024-3-9"), (false, 2024, 3, 9));
        assert_eq!(calendar_key("2024-03-09T10:00"), (false, 2024, 3, 9));
    }

    #[test]
    fn calendar_sort_puts_unparseable_dates_last_and_is_stable() {
        let mut trainings = vec![
            dated(1, "soon"),
            dated(2, "2024-05-01"),
            dated(3, "2024-01-15"),
            dated(4, ""),
            dated(5, "2024-01-15"),
        ];
        sort_for_calendar(&mut trainings);

        let ids: Vec<i64> = trainings.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 5, 2, 1, 4]);
    }
}
