use federwi_core::{Category, LocalStore, Note, Store, Task};
use serde_json::json;
use uuid::Uuid;

#[test]
fn create_then_get_by_id_preserves_all_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path());

    let mut task = Task::new("persist me", Category::MediumTerm);
    task.description = "with details".to_string();
    task.tags = vec!["work".to_string(), "q1".to_string()];

    let created = store.create(task.clone()).unwrap();
    assert_eq!(created, task);

    let loaded = store.get_by_id(task.id).unwrap().expect("task exists");
    assert_eq!(loaded, task);
}

#[test]
fn create_assigns_an_id_when_the_incoming_id_is_nil() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path());

    let mut task = Task::new("needs id", Category::ShortTerm);
    task.id = Uuid::nil();

    let created = store.create(task).unwrap();
    assert!(!created.id.is_nil());
    assert!(store.get_by_id(created.id).unwrap().is_some());
}

#[test]
fn update_merges_patch_and_stamps_last_modified() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path());

    let task = store
        .create(Task::new("before", Category::ShortTerm))
        .unwrap();

    let updated = store
        .update(task.id, &json!({ "title": "after" }))
        .unwrap()
        .expect("task exists");

    assert_eq!(updated.title, "after");
    assert_eq!(updated.description, task.description);
    assert!(updated.last_modified_timestamp > task.last_modified_timestamp);
}

#[test]
fn update_of_missing_id_returns_none() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path());

    let result = store
        .update(Uuid::new_v4(), &json!({ "title": "ghost" }))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn delete_is_idempotent_and_always_true() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path());

    let task = store
        .create(Task::new("short lived", Category::ShortTerm))
        .unwrap();

    assert!(store.delete(task.id).unwrap());
    assert!(store.delete(task.id).unwrap());
    assert!(store.delete(Uuid::new_v4()).unwrap());
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn corrupt_blob_is_reset_to_an_empty_collection() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Note> = LocalStore::new(dir.path());

    std::fs::create_dir_all(dir.path()).unwrap();
    std::fs::write(store.blob_path(), "{not json").unwrap();

    assert!(store.get_all().unwrap().is_empty());

    // The blob is usable again after the reset.
    let note = store.create(Note::new("fresh", "content")).unwrap();
    assert_eq!(store.get_all().unwrap(), vec![note]);
}

#[test]
fn missing_blob_reads_as_empty_collection() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store: LocalStore<Task> = LocalStore::new(dir.path().join("nested"));

    assert!(store.get_all().unwrap().is_empty());
    assert!(store.get_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn collections_are_namespaced_per_entity() {
    let dir = tempfile::tempdir().expect("temp dir");
    let tasks: LocalStore<Task> = LocalStore::new(dir.path());
    let notes: LocalStore<Note> = LocalStore::new(dir.path());

    tasks.create(Task::new("a task", Category::ShortTerm)).unwrap();
    notes.create(Note::new("a note", "body")).unwrap();

    assert_eq!(tasks.get_all().unwrap().len(), 1);
    assert_eq!(notes.get_all().unwrap().len(), 1);
    assert!(tasks.blob_path().ends_with("federwi_todos.json"));
    assert!(notes.blob_path().ends_with("federwi_notes.json"));
}
