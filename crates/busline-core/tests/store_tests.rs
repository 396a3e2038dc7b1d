use std::sync::Arc;

use busline_core::{
    models::{ChatHistory, ChatMessage, ChatRole, CustomerInfo},
    store::{Database, Persisted, CHAT_KEY, CUSTOMER_KEY},
    StateStore, StoreBuilder,
};
use tempfile::{NamedTempFile, TempDir};

mod common;
use common::{create_test_store, open_store, rahim};

#[test]
fn test_database_initialization() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");

    assert!(db.keys().expect("Failed to list keys").is_empty());
}

#[test]
fn test_value_upsert_and_delete() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut db = Database::new(temp_file.path()).expect("Failed to create test database");

    db.put_value("booking-storage", r#"{"name":"A"}"#).unwrap();
    db.put_value("booking-storage", r#"{"name":"B"}"#).unwrap();
    assert_eq!(
        db.get_value("booking-storage").unwrap().as_deref(),
        Some(r#"{"name":"B"}"#)
    );
    assert_eq!(db.keys().unwrap(), vec!["booking-storage".to_string()]);

    assert!(db.delete_value("booking-storage").unwrap());
    assert!(!db.delete_value("booking-storage").unwrap());
    assert_eq!(db.get_value("booking-storage").unwrap(), None);
}

#[test]
fn test_non_json_values_are_refused() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let mut db = Database::new(temp_file.path()).expect("Failed to create test database");

    assert!(db.put_value("chat-storage", "not json").is_err());
}

#[tokio::test]
async fn test_builder_creates_missing_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nested = temp_dir.path().join("a").join("b").join("state.db");

    let store = StoreBuilder::new()
        .with_state_path(Some(&nested))
        .build()
        .await
        .expect("Failed to build store");

    assert!(nested.exists());
    assert_eq!(store.path(), nested.as_path());
}

#[tokio::test]
async fn test_customer_survives_reopen() {
    let (temp_dir, store) = create_test_store().await;
    let persisted = Persisted::<CustomerInfo>::new(Arc::new(store), CUSTOMER_KEY);
    persisted.save(&rahim()).await.unwrap();

    let reopened = open_store(&temp_dir).await;
    let persisted = Persisted::<CustomerInfo>::new(Arc::new(reopened), CUSTOMER_KEY);
    assert_eq!(persisted.load().await.unwrap(), Some(rahim()));
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (_temp_dir, store) = create_test_store().await;
    let store = Arc::new(store);

    let customer = Persisted::<CustomerInfo>::new(store.clone(), CUSTOMER_KEY);
    let chat = Persisted::<ChatHistory>::new(store.clone(), CHAT_KEY);

    customer.save(&rahim()).await.unwrap();
    chat.save(&ChatHistory {
        messages: vec![ChatMessage::now(ChatRole::User, "Hello")],
        conversation_id: Some("c-1".to_string()),
    })
    .await
    .unwrap();

    assert_eq!(
        store.keys().await.unwrap(),
        vec![CUSTOMER_KEY.to_string(), CHAT_KEY.to_string()]
    );

    store.remove(CHAT_KEY).await.unwrap();
    assert_eq!(chat.load().await.unwrap(), None);
    assert_eq!(customer.load().await.unwrap(), Some(rahim()));
}
