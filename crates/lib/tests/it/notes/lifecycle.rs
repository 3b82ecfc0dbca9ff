use jotter::{NoteId, constants::NOTE_MAX_LEN, validation::ValidationError};

use crate::helpers::*;

#[tokio::test]
async fn test_add_and_list() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let first = notes.add_note(alice.id, "buy milk").await.unwrap();
    let second = notes.add_note(alice.id, "call mom").await.unwrap();

    assert_eq!(first.user_id, alice.id);
    assert!(second.id > first.id);

    let listed = notes.list_notes(alice.id).await.unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[tokio::test]
async fn test_dates_come_from_the_clock() {
    let (instance, clock) = test_instance_with_clock().await;
    let alice = register(&instance, "alice").await;

    clock.set(1_720_000_000_000);
    let note = {
        let _hold = clock.hold();
        instance.notes().add_note(alice.id, "dated").await.unwrap()
    };
    assert_eq!(note.date.timestamp_millis(), 1_720_000_000_000);

    clock.advance(5);
    let later = instance.notes().add_note(alice.id, "later").await.unwrap();
    assert_eq!(later.date.timestamp_millis(), 1_720_000_000_005);
}

#[tokio::test]
async fn test_empty_note_is_rejected() {
    let (instance, alice) = test_instance_with_user("alice").await;

    let err = instance.notes().add_note(alice.id, "").await.unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::EmptyNote));
    assert_eq!(err.to_string(), "Note is too short!");
    assert!(instance.notes().list_notes(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_length_limit() {
    let (instance, alice) = test_instance_with_user("alice").await;

    let at_limit = "n".repeat(NOTE_MAX_LEN);
    instance.notes().add_note(alice.id, &at_limit).await.unwrap();

    let over = "n".repeat(NOTE_MAX_LEN + 1);
    let err = instance.notes().add_note(alice.id, &over).await.unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::NoteTooLong { max: NOTE_MAX_LEN })
    );
    assert_eq!(instance.notes().list_notes(alice.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_edit_keeps_id_and_date() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "draft").await.unwrap();
    let edited = notes.edit_note(alice.id, note.id, "final").await.unwrap();

    assert_eq!(edited.id, note.id);
    assert_eq!(edited.date, note.date);
    assert_eq!(edited.data, "final");
    assert_eq!(notes.get_note(alice.id, note.id).await.unwrap(), edited);
}

#[tokio::test]
async fn test_edit_may_blank_a_note() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "draft").await.unwrap();
    let edited = notes.edit_note(alice.id, note.id, "").await.unwrap();
    assert_eq!(edited.data, "");
}

#[tokio::test]
async fn test_edit_over_limit_changes_nothing() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "draft").await.unwrap();
    let err = notes
        .edit_note(alice.id, note.id, &"x".repeat(NOTE_MAX_LEN + 1))
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(notes.get_note(alice.id, note.id).await.unwrap(), note);
}

#[tokio::test]
async fn test_edit_missing_note() {
    let (instance, alice) = test_instance_with_user("alice").await;

    let err = instance
        .notes()
        .edit_note(alice.id, NoteId(999), "text")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_removes_note() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let keep = notes.add_note(alice.id, "keep").await.unwrap();
    let gone = notes.add_note(alice.id, "gone").await.unwrap();

    notes.delete_note(alice.id, gone.id).await.unwrap();

    assert_eq!(notes.list_notes(alice.id).await.unwrap(), vec![keep]);
    assert!(notes.get_note(alice.id, gone.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (instance, alice) = test_instance_with_user("alice").await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "once").await.unwrap();
    notes.delete_note(alice.id, note.id).await.unwrap();
    notes.delete_note(alice.id, note.id).await.unwrap();
    notes.delete_note(alice.id, NoteId(12345)).await.unwrap();

    assert!(notes.list_notes(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_note_for_unknown_user_fails() {
    let instance = test_instance().await;

    let err = instance
        .notes()
        .add_note(jotter::UserId(77), "orphan")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.is_persistence_error());
}
