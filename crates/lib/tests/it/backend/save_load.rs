use tempfile::TempDir;

use jotter::{Instance, backend::InMemory};

use crate::helpers::PASSWORD;

#[tokio::test]
async fn test_in_memory_backend_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("jotter.json");

    let (alice_id, note_id) = {
        let backend = InMemory::new();
        let instance = Instance::open(Box::new(backend));
        let alice = instance
            .accounts()
            .sign_up("alice@example.com", "alice", PASSWORD, PASSWORD)
            .await
            .unwrap();
        let note = instance.notes().add_note(alice.id, "persist me").await.unwrap();

        let backend = instance
            .backend()
            .as_any()
            .downcast_ref::<InMemory>()
            .unwrap();
        backend.save_to_file(&path).await.unwrap();
        (alice.id, note.id)
    };

    assert!(path.exists());

    let loaded = InMemory::load_from_file(&path).await.unwrap();
    assert_eq!(loaded.user_count().await, 1);
    assert_eq!(loaded.note_count().await, 1);

    let instance = Instance::open(Box::new(loaded));
    let user = instance
        .accounts()
        .authenticate("alice@example.com", PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.id, alice_id);

    let notes = instance.notes().list_notes(alice_id).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, note_id);
    assert_eq!(notes[0].data, "persist me");

    // Counters survive the round trip, so ids are never reused.
    let next = instance.notes().add_note(alice_id, "after reload").await.unwrap();
    assert!(next.id > note_id);
}

#[tokio::test]
async fn test_load_non_existent_file() {
    let dir = TempDir::new().unwrap();
    let backend = InMemory::load_from_file(dir.path().join("missing.json"))
        .await
        .unwrap();
    assert_eq!(backend.user_count().await, 0);
}

#[tokio::test]
async fn test_load_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invalid.json");
    std::fs::write(&path, "{invalid json").unwrap();

    let result = InMemory::load_from_file(&path).await;
    assert!(result.is_err());
    assert!(result.unwrap_err().is_persistence_error());
}
