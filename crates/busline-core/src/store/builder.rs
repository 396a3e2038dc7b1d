//! Builder for creating and configuring the SQLite state store.

use std::path::{Path, PathBuf};

use tokio::task;

use super::{Database, SqliteStateStore};
use crate::error::{BookingError, Result};

/// Builder for creating and configuring [`SqliteStateStore`] instances.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    state_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { state_path: None }
    }

    /// Sets a custom state file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/busline/state.db` or `~/.local/share/busline/state.db`
    pub fn with_state_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.state_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the store, creating the file and schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::FileSystem` if the parent directory cannot be
    /// created, `BookingError::Storage` if schema initialization fails.
    pub async fn build(self) -> Result<SqliteStateStore> {
        let db_path = match self.state_path {
            Some(path) => path,
            None => Self::default_state_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BookingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), BookingError>(())
        })
        .await
        .map_err(BookingError::join)??;

        Ok(SqliteStateStore::new(db_path))
    }

    /// Returns the default state path following XDG Base Directory
    /// specification.
    fn default_state_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("busline")
            .place_data_file("state.db")
            .map_err(|e| BookingError::XdgDirectory(e.to_string()))
    }
}
