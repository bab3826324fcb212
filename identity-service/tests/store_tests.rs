use std::sync::Arc;

use chrono::Utc;
use identity_service::domain::identity::models::Identity;
use identity_service::domain::identity::models::IdentityId;
use identity_service::domain::identity::models::PersonName;
use identity_service::domain::identity::models::Username;
use identity_service::domain::identity::ports::IdentityStore;
use identity_service::identity::errors::IdentityError;
use identity_service::outbound::repositories::InMemoryIdentityStore;

fn identity(username: &str, name: &str) -> Identity {
    Identity {
        id: IdentityId::new(),
        username: Username::new(username.to_string()).unwrap(),
        name: PersonName::new(name.to_string()).unwrap(),
        surname: PersonName::new("Smith".to_string()).unwrap(),
        password_hash: "$argon2id$test_hash".to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_then_find() {
    let store = InMemoryIdentityStore::new();

    let created = store.create(identity("Alice", "Alice")).await.unwrap();

    // Lookup is case-insensitive, storage is case-preserving
    let found = store
        .find_by_username(&Username::new("ALICE".to_string()).unwrap())
        .await
        .unwrap()
        .expect("Identity should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.username.as_str(), "Alice");
}

#[tokio::test]
async fn test_find_absent_returns_none() {
    let store = InMemoryIdentityStore::new();

    let found = store
        .find_by_username(&Username::new("nobody".to_string()).unwrap())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn test_duplicate_create_rejected_case_insensitive() {
    let store = InMemoryIdentityStore::new();

    store.create(identity("alice", "First")).await.unwrap();

    let result = store.create(identity("Alice", "Second")).await;
    assert!(matches!(result, Err(IdentityError::DuplicateUsername(_))));

    // The first record survives untouched
    let found = store
        .find_by_username(&Username::new("alice".to_string()).unwrap())
        .await
        .unwrap()
        .expect("Identity should exist");
    assert_eq!(found.name.as_str(), "First");
}

#[tokio::test]
async fn test_update_password_hash() {
    let store = InMemoryIdentityStore::new();
    let username = Username::new("alice".to_string()).unwrap();

    store.create(identity("alice", "Alice")).await.unwrap();

    store
        .update_password_hash(&username, "$argon2id$new_hash")
        .await
        .unwrap();

    let found = store
        .find_by_username(&username)
        .await
        .unwrap()
        .expect("Identity should exist");
    assert_eq!(found.password_hash, "$argon2id$new_hash");
}

#[tokio::test]
async fn test_update_password_hash_absent() {
    let store = InMemoryIdentityStore::new();
    let username = Username::new("nobody".to_string()).unwrap();

    let result = store.update_password_hash(&username, "$argon2id$hash").await;
    assert!(matches!(result, Err(IdentityError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_twice_errors_the_second_time() {
    let store = InMemoryIdentityStore::new();
    let username = Username::new("alice".to_string()).unwrap();

    store.create(identity("alice", "Alice")).await.unwrap();

    store.delete(&username).await.unwrap();

    let result = store.delete(&username).await;
    assert!(matches!(result, Err(IdentityError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_create_exactly_one_wins() {
    let store = Arc::new(InMemoryIdentityStore::new());

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(identity("alice", &format!("Caller{}", i))).await
        }));
    }

    let mut winners = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.expect("Task panicked") {
            Ok(_) => winners += 1,
            Err(IdentityError::DuplicateUsername(_)) => duplicates += 1,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(duplicates, 7);

    // The store holds exactly one record for the username
    let found = store
        .find_by_username(&Username::new("alice".to_string()).unwrap())
        .await
        .unwrap();
    assert!(found.is_some());
}
