use jotter::{
    Error,
    user::{Identity, UserError},
    validation::ValidationError,
};

use crate::helpers::*;

#[tokio::test]
async fn test_sign_up_creates_user() {
    let instance = test_instance().await;

    let user = instance
        .accounts()
        .sign_up("a@x.co", "alice", "Passw0rd", "Passw0rd")
        .await
        .unwrap();

    assert_eq!(user.email, "a@x.co");
    assert_eq!(user.name, "alice");
    assert_ne!(user.password_hash, "Passw0rd");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let stored = instance.accounts().get(user.id).await.unwrap().unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (_instance, alice, bob) = test_instance_with_two_users().await;
    assert_ne!(alice.id, bob.id);
    assert_ne!(alice.session_key(), bob.session_key());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let err = instance
        .accounts()
        .sign_up("alice@example.com", "other", PASSWORD, PASSWORD)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(matches!(err, Error::User(UserError::DuplicateEmail { .. })));
    assert_eq!(err.to_string(), "Email already exists. Try logging in instead.");
}

#[tokio::test]
async fn test_email_uniqueness_is_case_sensitive() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let user = instance
        .accounts()
        .sign_up("Alice@example.com", "alice2", PASSWORD, PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.email, "Alice@example.com");
}

#[tokio::test]
async fn test_invalid_signup_touches_nothing() {
    let instance = test_instance().await;

    let err = instance
        .accounts()
        .sign_up("a@x.co", "alice", "password", "password")
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::PasswordNeedsLettersAndNumbers)
    );

    assert!(
        instance
            .backend()
            .find_user_by_email("a@x.co")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_mismatched_confirmation() {
    let instance = test_instance().await;

    let err = instance
        .accounts()
        .sign_up("a@x.co", "alice", "Passw0rd", "Passw0rd!")
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.to_string(), "Passwords do not match.");
}

#[tokio::test]
async fn test_get_unknown_user_is_none() {
    let instance = test_instance().await;
    let missing = instance.accounts().get(jotter::UserId(42)).await.unwrap();
    assert!(missing.is_none());
}
