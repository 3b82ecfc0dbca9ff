//! Behavior every backend shares, run against whichever backend
//! TEST_BACKEND selects.

use chrono::DateTime;
use jotter::{
    Error, UserId,
    backend::BackendError,
    notes::{NewNote, NoteId},
    user::NewUser,
};

use crate::helpers::*;

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "someone".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

fn new_note(owner: UserId, data: &str) -> NewNote {
    NewNote {
        data: data.to_string(),
        date: DateTime::from_timestamp_millis(1_704_067_200_000).unwrap(),
        user_id: owner,
    }
}

#[tokio::test]
async fn test_user_ids_start_at_one_and_increase() {
    let backend = test_backend().await;

    let first = backend.insert_user(new_user("a@x.co")).await.unwrap();
    let second = backend.insert_user(new_user("b@x.co")).await.unwrap();

    assert_eq!(first.id, UserId(1));
    assert_eq!(second.id, UserId(2));
}

#[tokio::test]
async fn test_insert_user_rejects_duplicate_email() {
    let backend = test_backend().await;

    backend.insert_user(new_user("a@x.co")).await.unwrap();
    let err = backend.insert_user(new_user("a@x.co")).await.unwrap_err();

    assert!(matches!(err, Error::Backend(BackendError::EmailTaken { .. })));
    assert!(backend.get_user(UserId(2)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_by_email_and_id() {
    let backend = test_backend().await;

    let user = backend.insert_user(new_user("a@x.co")).await.unwrap();

    assert_eq!(
        backend.find_user_by_email("a@x.co").await.unwrap(),
        Some(user.clone())
    );
    assert_eq!(backend.get_user(user.id).await.unwrap(), Some(user));
    assert!(backend.find_user_by_email("b@x.co").await.unwrap().is_none());
}

#[tokio::test]
async fn test_note_round_trip_keeps_date() {
    let backend = test_backend().await;
    let user = backend.insert_user(new_user("a@x.co")).await.unwrap();

    let note = backend.insert_note(new_note(user.id, "hello")).await.unwrap();
    let fetched = backend.get_note(note.id).await.unwrap().unwrap();

    assert_eq!(fetched, note);
    assert_eq!(fetched.date.timestamp_millis(), 1_704_067_200_000);
}

#[tokio::test]
async fn test_insert_note_requires_owner() {
    let backend = test_backend().await;

    let err = backend
        .insert_note(new_note(UserId(5), "orphan"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Backend(BackendError::UserNotFound { id: UserId(5) })
    ));
    assert!(backend.get_note(NoteId(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_orders_by_id() {
    let backend = test_backend().await;
    let user = backend.insert_user(new_user("a@x.co")).await.unwrap();

    for text in ["one", "two", "three"] {
        backend.insert_note(new_note(user.id, text)).await.unwrap();
    }

    let texts: Vec<String> = backend
        .list_notes(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.data)
        .collect();
    assert_eq!(texts, ["one", "two", "three"]);
}

#[tokio::test]
async fn test_update_and_delete_report_matches() {
    let backend = test_backend().await;
    let user = backend.insert_user(new_user("a@x.co")).await.unwrap();
    let note = backend.insert_note(new_note(user.id, "v1")).await.unwrap();

    let updated = backend
        .update_note(note.id, user.id, "v2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.data, "v2");
    assert_eq!(updated.date, note.date);

    assert!(backend.delete_note(note.id, user.id).await.unwrap());
    assert!(!backend.delete_note(note.id, user.id).await.unwrap());
    assert!(
        backend
            .update_note(note.id, user.id, "v3")
            .await
            .unwrap()
            .is_none()
    );
}
