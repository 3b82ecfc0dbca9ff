//! Two users sharing one instance, end to end.

use crate::helpers::*;

#[tokio::test]
async fn test_two_users_keep_to_their_own_notes() {
    let instance = test_instance().await;
    let accounts = instance.accounts();
    let notes = instance.notes();

    let alice = accounts
        .sign_up("alice@example.com", "alice", "Passw0rd", "Passw0rd")
        .await
        .unwrap();
    let bob = accounts
        .sign_up("bob@example.com", "bob_b", "Hunter22x", "Hunter22x")
        .await
        .unwrap();

    let signed_in = accounts
        .authenticate("alice@example.com", "Passw0rd")
        .await
        .unwrap();
    assert_eq!(signed_in.id, alice.id);

    let milk = notes.add_note(alice.id, "buy milk").await.unwrap();
    let mom = notes.add_note(alice.id, "call mom").await.unwrap();
    let bobs = notes.add_note(bob.id, "bob's secret").await.unwrap();

    // Bob can neither edit nor delete Alice's notes.
    assert!(
        notes
            .edit_note(bob.id, milk.id, "pwned")
            .await
            .unwrap_err()
            .is_permission_denied()
    );
    notes.delete_note(bob.id, mom.id).await.unwrap();

    // Alice edits one note and deletes the other.
    notes.edit_note(alice.id, milk.id, "buy oat milk").await.unwrap();
    notes.delete_note(alice.id, mom.id).await.unwrap();

    let alices = notes.list_notes(alice.id).await.unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].data, "buy oat milk");
    assert_eq!(alices[0].date, milk.date);

    assert_eq!(notes.list_notes(bob.id).await.unwrap(), vec![bobs]);
}
