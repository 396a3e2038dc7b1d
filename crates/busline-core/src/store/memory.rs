//! In-memory state store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::StateStore;
use crate::error::Result;

/// Volatile state store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: DashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn save_raw(&self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
