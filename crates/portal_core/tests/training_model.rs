use portal_core::{
    JsonTrainingRepository, Material, Participant, ParticipantKey, ParticipantStatus, Training,
    TrainingDraft, TrainingRepository, UnavailableRequest,
};
use serde_json::json;

fn sample_training() -> Training {
    Training {
        id: 1_710_000_000_000,
        title: "Async Rust".to_string(),
        date: "2024-03-10".to_string(),
        time: "14:00".to_string(),
        instructor: "Zhang".to_string(),
        location: "Room 3".to_string(),
        description: "tokio and friends".to_string(),
        materials: vec![Material {
            name: "notes".to_string(),
            url: "https://intranet/notes".to_string(),
        }],
        participants: vec![Participant {
            name: "Li".to_string(),
            department: "R&D".to_string(),
            status: ParticipantStatus::Unavailable,
            reason: "travel".to_string(),
        }],
        created_at: Some(1_710_000_000_123),
    }
}

#[test]
fn training_serializes_with_expected_wire_fields() {
    let value = serde_json::to_value(sample_training()).unwrap();

    assert_eq!(value["id"], 1_710_000_000_000_i64);
    assert_eq!(value["createdAt"], 1_710_000_000_123_i64);
    assert_eq!(value["participants"][0]["status"], "unavailable");
    assert_eq!(value["materials"][0]["url"], "https://intranet/notes");
}

#[test]
fn legacy_record_without_participants_or_created_at_parses() {
    let value = json!({
        "id": 1_700_000_000_000_i64,
        "title": "Legacy",
        "date": "2023-11-14",
        "time": "09:00",
        "instructor": "Wang",
        "location": "Hall",
        "description": "",
        "materials": []
    });

    let training: Training = serde_json::from_value(value).unwrap();
    assert!(training.participants.is_empty());
    assert_eq!(training.created_at, None);
    assert_eq!(training.display_timestamp(), 1_700_000_000_000);

    let reencoded = serde_json::to_value(&training).unwrap();
    assert!(reencoded.get("createdAt").is_none());
}

#[test]
fn collection_survives_write_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trainings.json");
    let repo = JsonTrainingRepository::new(&path);
    let mut second = Training::from_draft(2, TrainingDraft::default(), 5);
    second.title = "Unicode 培训".to_string();
    let collection = vec![sample_training(), second];

    repo.save_trainings(&collection).unwrap();

    assert_eq!(repo.list_trainings(), collection);
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["trainings"].as_array().unwrap().len(), 2);
}

#[test]
fn participant_helpers_enforce_pair_uniqueness() {
    let mut training = Training::from_draft(1, TrainingDraft::default(), 0);
    let request = UnavailableRequest {
        name: "Li".to_string(),
        department: "R&D".to_string(),
        reason: "travel".to_string(),
    };

    assert!(training.add_participant(request.clone()));
    assert!(!training.add_participant(request));
    assert_eq!(training.participants.len(), 1);

    assert!(training
        .remove_participant(&ParticipantKey::new("Li", "Ops"))
        .is_none());
    let removed = training
        .remove_participant(&ParticipantKey::new("Li", "R&D"))
        .unwrap();
    assert_eq!(removed.reason, "travel");
    assert!(training.participants.is_empty());
}

#[test]
fn record_missing_scalar_keys_does_not_hide_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trainings.json");
    let raw = json!({
        "trainings": [
            { "id": 1, "title": "Full", "date": "2024-01-01", "time": "10:00",
              "instructor": "A", "location": "Room1", "description": "D",
              "materials": [] },
            { "id": 2, "title": "Hand edited", "date": "2024-02-01" }
        ]
    });
    std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();
    let repo = JsonTrainingRepository::new(&path);

    let listed = repo.list_trainings();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].title, "Hand edited");
    assert_eq!(listed[1].description, "");
    assert_eq!(listed[1].instructor, "");
    assert_eq!(repo.load_trainings().unwrap().len(), 2);
}
