use jotter::{Error, notes::NoteError};

use crate::helpers::*;

#[tokio::test]
async fn test_listing_is_scoped_to_owner() {
    let (instance, alice, bob) = test_instance_with_two_users().await;
    let notes = instance.notes();

    let a = notes.add_note(alice.id, "alice's").await.unwrap();
    let b = notes.add_note(bob.id, "bob's").await.unwrap();

    assert_eq!(notes.list_notes(alice.id).await.unwrap(), vec![a]);
    assert_eq!(notes.list_notes(bob.id).await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_foreign_get_is_refused() {
    let (instance, alice, bob) = test_instance_with_two_users().await;

    let note = instance.notes().add_note(alice.id, "private").await.unwrap();
    let err = instance.notes().get_note(bob.id, note.id).await.unwrap_err();

    assert!(err.is_permission_denied());
}

#[tokio::test]
async fn test_foreign_edit_is_refused_and_changes_nothing() {
    let (instance, alice, bob) = test_instance_with_two_users().await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "original").await.unwrap();
    let err = notes.edit_note(bob.id, note.id, "hijacked").await.unwrap_err();

    assert!(err.is_permission_denied());
    assert!(matches!(err, Error::Note(NoteError::NotOwner { id, requester }) if id == note.id && requester == bob.id));
    assert_eq!(notes.get_note(alice.id, note.id).await.unwrap(), note);
}

#[tokio::test]
async fn test_foreign_delete_is_silent_and_changes_nothing() {
    let (instance, alice, bob) = test_instance_with_two_users().await;
    let notes = instance.notes();

    let note = notes.add_note(alice.id, "mine").await.unwrap();
    notes.delete_note(bob.id, note.id).await.unwrap();

    assert_eq!(notes.list_notes(alice.id).await.unwrap(), vec![note]);
}

#[tokio::test]
async fn test_backend_filters_by_owner() {
    let (instance, alice, bob) = test_instance_with_two_users().await;
    let backend = instance.backend();

    let note = instance.notes().add_note(alice.id, "mine").await.unwrap();

    assert!(backend.update_note(note.id, bob.id, "x").await.unwrap().is_none());
    assert!(!backend.delete_note(note.id, bob.id).await.unwrap());
    assert_eq!(backend.get_note(note.id).await.unwrap(), Some(note));
}
