//! Durable client-side state.
//!
//! This module persists the small amount of state that must survive an
//! application restart: the customer's identity and the chat history. It
//! offers a key-scoped [`StateStore`] interface, a SQLite implementation for
//! real use, an in-memory one for tests and embedding, and the typed
//! [`Persisted`] adapter that the stores above it talk to.
//!
//! Booking drafts are never written here.

use std::{marker::PhantomData, path::Path, sync::Arc};

use async_trait::async_trait;
use log::warn;
use rusqlite::Connection;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{DatabaseResultExt, Result};

pub mod builder;
pub mod kv_queries;
pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use builder::StoreBuilder;
pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;

/// Storage key for the customer identity.
pub const CUSTOMER_KEY: &str = "booking-storage";

/// Storage key for the chat conversation.
pub const CHAT_KEY: &str = "chat-storage";

/// SQLite connection holding the key/value table.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the state file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open state database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Key-scoped raw storage of JSON documents.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the document stored under `key`, if any.
    async fn load_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    async fn save_raw(&self, key: &str, value: String) -> Result<()>;

    /// Forget `key`. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Typed load/save adapter over a [`StateStore`] key.
pub struct Persisted<T> {
    store: Arc<dyn StateStore>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for Persisted<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _value: PhantomData,
        }
    }
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn StateStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load the stored value, or `None` when nothing was saved yet.
    pub async fn load(&self) -> Result<Option<T>> {
        match self.store.load_raw(self.key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Load the stored value, falling back to `T::default()` when the key is
    /// missing or unreadable. In-memory state starts from whatever this
    /// returns, so a broken store degrades to a fresh session.
    pub async fn load_or_default(&self) -> T
    where
        T: Default,
    {
        match self.load().await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring unreadable state under '{}': {e}", self.key);
                T::default()
            }
        }
    }

    pub async fn save(&self, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.save_raw(self.key, raw).await
    }

    /// Save without surfacing failures. In-memory state stays the record of
    /// truth for the session; a failed write is only logged.
    pub async fn save_detached(&self, value: &T) {
        if let Err(e) = self.save(value).await {
            warn!("Failed to persist state under '{}': {e}", self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerInfo;

    #[tokio::test]
    async fn test_persisted_roundtrip_in_memory() {
        let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
        let persisted = Persisted::<CustomerInfo>::new(store, CUSTOMER_KEY);

        assert_eq!(persisted.load().await.unwrap(), None);

        let info = CustomerInfo::new("Rahim", "rahim@example.com", "+8801700000000");
        persisted.save(&info).await.unwrap();
        assert_eq!(persisted.load().await.unwrap(), Some(info));
    }

    #[tokio::test]
    async fn test_unreadable_value_loads_default() {
        let memory = Arc::new(MemoryStateStore::new());
        memory
            .save_raw(CUSTOMER_KEY, "[1, 2, 3]".to_string())
            .await
            .unwrap();

        let persisted = Persisted::<CustomerInfo>::new(memory, CUSTOMER_KEY);
        assert!(persisted.load().await.is_err());
        assert_eq!(persisted.load_or_default().await, CustomerInfo::default());
    }
}
