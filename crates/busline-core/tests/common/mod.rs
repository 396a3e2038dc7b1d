#![allow(dead_code)]

use busline_core::{
    models::{CustomerInfo, DroppingPoint, Route},
    SqliteStateStore, StoreBuilder,
};
use tempfile::TempDir;

/// Helper function to create a state store in a fresh temp directory
pub async fn create_test_store() -> (TempDir, SqliteStateStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = open_store(&temp_dir).await;
    (temp_dir, store)
}

/// Open (or reopen) the state file inside `temp_dir`
pub async fn open_store(temp_dir: &TempDir) -> SqliteStateStore {
    StoreBuilder::new()
        .with_state_path(Some(temp_dir.path().join("state.db")))
        .build()
        .await
        .expect("Failed to create state store")
}

pub fn hanif_route() -> Route {
    Route {
        provider: "Hanif".to_string(),
        from_district: "Dhaka".to_string(),
        to_district: "Sylhet".to_string(),
        min_price: Some(500),
        max_price: Some(700),
        dropping_points: vec![
            DroppingPoint::new("Kadamtoli", 500),
            DroppingPoint::new("Subhanighat", 600),
        ],
        description: "Daily coach service".to_string(),
    }
}

pub fn rahim() -> CustomerInfo {
    CustomerInfo::new("Rahim Uddin", "rahim@example.com", "+8801700000000")
}
