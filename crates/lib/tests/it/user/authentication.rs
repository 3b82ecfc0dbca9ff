use jotter::{Error, user::UserError};

use crate::helpers::*;

#[tokio::test]
async fn test_authenticate_returns_user() {
    let (instance, alice) = test_instance_with_user("alice").await;

    let user = instance
        .accounts()
        .authenticate("alice@example.com", PASSWORD)
        .await
        .unwrap();
    assert_eq!(user.id, alice.id);
}

#[tokio::test]
async fn test_unknown_email() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let err = instance
        .accounts()
        .authenticate("nobody@example.com", PASSWORD)
        .await
        .unwrap_err();

    assert!(err.is_authentication_error());
    assert!(err.is_not_found());
    assert!(matches!(err, Error::User(UserError::UnknownEmail { .. })));
    assert_eq!(err.to_string(), "User does not exist.");
}

#[tokio::test]
async fn test_wrong_password() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let err = instance
        .accounts()
        .authenticate("alice@example.com", "Wrong1234")
        .await
        .unwrap_err();

    assert!(err.is_authentication_error());
    assert!(matches!(err, Error::User(UserError::BadPassword)));
    assert_eq!(err.to_string(), "Incorrect password.");
}

#[tokio::test]
async fn test_password_is_case_sensitive() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let result = instance
        .accounts()
        .authenticate("alice@example.com", &PASSWORD.to_lowercase())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_email_lookup_is_exact() {
    let (instance, _alice) = test_instance_with_user("alice").await;

    let err = instance
        .accounts()
        .authenticate("ALICE@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::User(UserError::UnknownEmail { .. })));
}
