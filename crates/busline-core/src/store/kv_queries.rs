//! Key/value queries on the state table.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv_state WHERE key = ?1";
const UPSERT_VALUE_SQL: &str = "INSERT INTO kv_state (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv_state WHERE key = ?1";
const SELECT_KEYS_SQL: &str = "SELECT key FROM kv_state ORDER BY key";

impl super::Database {
    /// Reads the JSON document stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read state value")
    }

    /// Inserts or replaces the JSON document stored under `key`.
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(UPSERT_VALUE_SQL, params![key, value, Timestamp::now().to_string()])
            .db_context("Failed to write state value")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Deletes `key`. Returns whether anything was removed.
    pub fn delete_value(&mut self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to delete state value")?;
        Ok(removed > 0)
    }

    /// Lists every stored key in order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare query")?;

        let keys = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query state keys")?
            .collect::<std::result::Result<Vec<String>, _>>()
            .db_context("Failed to read state keys")?;

        Ok(keys)
    }
}
