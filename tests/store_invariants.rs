//! Record Store Invariant Tests
//!
//! - Every persisted user has a unique id and a unique email
//! - Ids are monotonic and never reused after delete
//! - Failed writes leave the table unchanged
//! - Get/Update/Delete on unknown ids report NotFound

use serde_json::json;
use tempfile::TempDir;
use userdb::{NewUser, StoreConfig, StoreError, UserStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store() -> (TempDir, UserStore) {
    let tmp = TempDir::new().unwrap();
    let store = UserStore::new(StoreConfig::new(tmp.path().join("users.db")));
    store.initialize().unwrap();
    (tmp, store)
}

fn candidate(name: &str, email: &str, age: i64) -> NewUser {
    NewUser::from_candidate(&json!({"name": name, "email": email, "age": age})).unwrap()
}

// =============================================================================
// Create / Get Round Trip
// =============================================================================

#[test]
fn test_create_then_get_returns_submitted_fields() {
    let (_tmp, store) = setup_store();

    let created = store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    let loaded = store.get(created.id).unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Ann");
    assert_eq!(loaded.email, "ann@x.com");
    assert_eq!(loaded.age, 30);
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let (_tmp, store) = setup_store();

    let mut previous = 0;
    for i in 0..10 {
        let user = store
            .create(&candidate("User", &format!("user{}@x.com", i), i))
            .unwrap();
        assert!(user.id > previous);
        previous = user.id;
    }
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let (_tmp, store) = setup_store();

    let first = store.create(&candidate("A", "a@x.com", 1)).unwrap();
    let second = store.create(&candidate("B", "b@x.com", 2)).unwrap();
    store.delete(second.id).unwrap();
    store.delete(first.id).unwrap();

    let third = store.create(&candidate("C", "c@x.com", 3)).unwrap();
    assert!(third.id > second.id);
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn test_duplicate_email_is_rejected_and_not_written() {
    let (_tmp, store) = setup_store();

    store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    let err = store.create(&candidate("Other", "ann@x.com", 99)).unwrap_err();

    assert_eq!(err, StoreError::DuplicateKey);

    let users = store.list_all().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ann");
}

#[test]
fn test_update_to_another_users_email_is_rejected() {
    let (_tmp, store) = setup_store();

    let ann = store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    let bob = store.create(&candidate("Bob", "bob@x.com", 40)).unwrap();

    let err = store
        .update(bob.id, &candidate("Bob", "ann@x.com", 41))
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateKey);

    assert_eq!(store.get(bob.id).unwrap(), bob);
    assert_eq!(store.get(ann.id).unwrap(), ann);
}

// =============================================================================
// Update / Delete
// =============================================================================

#[test]
fn test_update_replaces_all_fields_and_keeps_id() {
    let (_tmp, store) = setup_store();

    let created = store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    let updated = store
        .update(created.id, &candidate("Ann2", "ann2@x.com", 31))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(store.get(created.id).unwrap(), updated);
    assert_eq!(updated.email, "ann2@x.com");
    assert_eq!(updated.age, 31);
}

#[test]
fn test_delete_removes_row() {
    let (_tmp, store) = setup_store();

    let keep = store.create(&candidate("Keep", "keep@x.com", 1)).unwrap();
    let gone = store.create(&candidate("Gone", "gone@x.com", 2)).unwrap();

    store.delete(gone.id).unwrap();

    assert_eq!(store.get(gone.id).unwrap_err(), StoreError::NotFound(gone.id));
    let ids: Vec<_> = store.list_all().unwrap().into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![keep.id]);
}

#[test]
fn test_deleted_email_can_be_reused() {
    let (_tmp, store) = setup_store();

    let first = store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    store.delete(first.id).unwrap();

    let second = store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();
    assert_ne!(second.id, first.id);
}

#[test]
fn test_unknown_id_is_not_found() {
    let (_tmp, store) = setup_store();
    store.create(&candidate("Ann", "ann@x.com", 30)).unwrap();

    assert_eq!(store.get(999999).unwrap_err(), StoreError::NotFound(999999));
    assert_eq!(
        store
            .update(999999, &candidate("X", "x@x.com", 1))
            .unwrap_err(),
        StoreError::NotFound(999999)
    );
    assert_eq!(store.delete(999999).unwrap_err(), StoreError::NotFound(999999));

    assert_eq!(store.list_all().unwrap().len(), 1);
}

// =============================================================================
// Listing and Persistence
// =============================================================================

#[test]
fn test_list_on_empty_table() {
    let (_tmp, store) = setup_store();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_list_is_stable() {
    let (_tmp, store) = setup_store();
    for i in 0..5 {
        store
            .create(&candidate("U", &format!("u{}@x.com", i), i))
            .unwrap();
    }

    let first = store.list_all().unwrap();
    let second = store.list_all().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_data_survives_new_store_instance() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("users.db");

    let created = {
        let store = UserStore::new(StoreConfig::new(&path));
        store.initialize().unwrap();
        store.create(&candidate("Ann", "ann@x.com", 30)).unwrap()
    };

    let store = UserStore::new(StoreConfig::new(&path));
    store.initialize().unwrap();
    assert_eq!(store.get(created.id).unwrap(), created);
}

#[test]
fn test_concurrent_duplicate_creates_keep_one_row() {
    let (_tmp, store) = setup_store();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || store.create(&candidate("Racer", "race@x.com", i)))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == StoreError::DuplicateKey));
    assert_eq!(store.list_all().unwrap().len(), 1);
}
