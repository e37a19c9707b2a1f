use portal_core::{
    DocumentDraft, DocumentPatch, JsonDocumentRepository, KnowledgeService, KnowledgeServiceError,
};
use serde_json::json;
use tempfile::TempDir;

fn service_in(dir: &TempDir) -> KnowledgeService<JsonDocumentRepository> {
    KnowledgeService::new(JsonDocumentRepository::new(
        dir.path().join("documents.json"),
    ))
}

fn draft(title: &str) -> DocumentDraft {
    DocumentDraft {
        title: title.to_string(),
        url: format!("https://intranet/{title}"),
        kind: "guide".to_string(),
        description: "internal".to_string(),
        update_time: "2024-03-10".to_string(),
    }
}

#[test]
fn ids_are_sequential_from_current_max() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);

    assert_eq!(service.add(draft("a")).unwrap().id, 1);
    assert_eq!(service.add(draft("b")).unwrap().id, 2);
    service.delete(1).unwrap();
    assert_eq!(service.add(draft("c")).unwrap().id, 3);
}

#[test]
fn ids_continue_after_existing_file_content() {
    let dir = tempfile::tempdir().unwrap();
    let seeded = json!({
        "documents": [
            { "id": 7, "title": "x", "url": "u", "type": "guide",
              "description": "", "updateTime": "2024-01-01" }
        ]
    });
    std::fs::write(
        dir.path().join("documents.json"),
        serde_json::to_string_pretty(&seeded).unwrap(),
    )
    .unwrap();
    let service = service_in(&dir);

    assert_eq!(service.add(draft("next")).unwrap().id, 8);
    assert_eq!(service.list().len(), 2);
}

#[test]
fn update_merges_provided_fields() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    let added = service.add(draft("a")).unwrap();

    let updated = service
        .update(
            added.id,
            DocumentPatch {
                title: Some("renamed".to_string()),
                ..DocumentPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.url, added.url);
    assert_eq!(updated.kind, "guide");
    assert_eq!(service.get(added.id).unwrap(), updated);
}

#[test]
fn update_and_delete_missing_id_fail_with_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.add(draft("a")).unwrap();

    let update_err = service.update(99, DocumentPatch::default()).unwrap_err();
    assert!(matches!(update_err, KnowledgeServiceError::DocumentNotFound(99)));

    let delete_err = service.delete(99).unwrap_err();
    assert!(matches!(delete_err, KnowledgeServiceError::DocumentNotFound(99)));
    assert_eq!(service.list().len(), 1);
}

#[test]
fn document_kind_is_stored_as_type_key() {
    let dir = tempfile::tempdir().unwrap();
    let service = service_in(&dir);
    service.add(draft("a")).unwrap();

    let raw: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("documents.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["documents"][0]["type"], "guide");
    assert_eq!(raw["documents"][0]["updateTime"], "2024-03-10");
}

#[test]
fn document_missing_keys_loads_with_empty_values() {
    let dir = tempfile::tempdir().unwrap();
    let seeded = json!({ "documents": [ { "id": 3, "title": "bare" } ] });
    std::fs::write(
        dir.path().join("documents.json"),
        serde_json::to_string_pretty(&seeded).unwrap(),
    )
    .unwrap();
    let service = service_in(&dir);

    let document = service.get(3).unwrap();
    assert_eq!(document.kind, "");
    assert_eq!(document.update_time, "");
    assert_eq!(service.add(draft("next")).unwrap().id, 4);
}
