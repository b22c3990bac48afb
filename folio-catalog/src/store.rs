//! Catalogue persistence.
//!
//! Drivers never touch the catalogue file directly: they receive a
//! [`CatalogueStore`], load the whole document once, mutate it in memory and
//! save it back once. [`JsonFileStore`] is the real file; [`MemoryStore`]
//! lets drivers run against in-memory fixtures.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::types::Catalogue;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Catalogue not found at {0}")]
    NotFound(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Repository for the catalogue document: whole-document load and save.
pub trait CatalogueStore {
    fn load(&self) -> Result<Catalogue, StoreError>;
    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError>;
}

/// The catalogue as a pretty-printed JSON file (2-space indentation).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CatalogueStore for JsonFileStore {
    fn load(&self) -> Result<Catalogue, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Overwrite the file with the full document.
    ///
    /// Written to a sibling temp file first and renamed over the target, so
    /// a failed write never leaves a truncated catalogue behind.
    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut serialized = serde_json::to_string_pretty(catalogue).map_err(|e| StoreError::Json {
            path: self.path.display().to_string(),
            source: e,
        })?;
        serialized.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serialized).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            self.io_error(e)
        })?;
        log::debug!(
            "Saved {} projects to {}",
            catalogue.projects.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory store for tests and dry runs. Counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalogue: Mutex<Option<Catalogue>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue: Mutex::new(Some(catalogue)),
            saves: AtomicUsize::new(0),
        }
    }

    /// A store with nothing in it; `load` reports [`StoreError::NotFound`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// The last saved (or initial) catalogue.
    pub fn snapshot(&self) -> Option<Catalogue> {
        self.catalogue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CatalogueStore for MemoryStore {
    fn load(&self) -> Result<Catalogue, StoreError> {
        self.snapshot()
            .ok_or_else(|| StoreError::NotFound("<memory>".to_string()))
    }

    fn save(&self, catalogue: &Catalogue) -> Result<(), StoreError> {
        *self
            .catalogue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(catalogue.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
