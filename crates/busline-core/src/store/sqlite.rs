//! SQLite-backed state store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::task;

use super::{Database, StateStore};
use crate::error::{BookingError, Result};

/// State store persisting to a SQLite file.
///
/// Each operation opens its own connection on the blocking pool, so the store
/// is cheap to share and never holds the file open between calls.
#[derive(Debug, Clone)]
pub struct SqliteStateStore {
    pub(crate) db_path: PathBuf,
}

impl SqliteStateStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Every key currently stored.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.keys()
        })
        .await
        .map_err(BookingError::join)?
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_value(&key)
        })
        .await
        .map_err(BookingError::join)?
    }

    async fn save_raw(&self, key: &str, value: String) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        debug!("Persisting state under '{key}'");

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.put_value(&key, &value)
        })
        .await
        .map_err(BookingError::join)?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_value(&key).map(|_| ())
        })
        .await
        .map_err(BookingError::join)?
    }
}
