use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::DismissalError;

/// Dismissal counters keyed by suggestion category.
pub type DismissalCounts = BTreeMap<String, u32>;

/// Durable storage for dismissal counters.
pub trait DismissalStore {
    fn load(&self) -> Result<DismissalCounts, DismissalError>;
    fn save(&self, counts: &DismissalCounts) -> Result<(), DismissalError>;
}

/// Counters kept in a JSON file on the local machine.
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
}

impl DismissalStore for JsonFileStore {
    fn load(&self) -> Result<DismissalCounts, DismissalError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(DismissalCounts::new()),
            Err(source) => {
                return Err(DismissalError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(DismissalCounts::new());
        }
        serde_json::from_str(&raw).map_err(|source| DismissalError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, counts: &DismissalCounts) -> Result<(), DismissalError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DismissalError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(counts).map_err(|source| {
            DismissalError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, payload).map_err(|source| DismissalError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Process-local store, shared between clones.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    counts: Arc<Mutex<DismissalCounts>>,
}

impl InMemoryStore {
    pub fn snapshot(&self) -> DismissalCounts {
        self.counts.lock().expect("dismissal mutex poisoned").clone()
    }
}

impl DismissalStore for InMemoryStore {
    fn load(&self) -> Result<DismissalCounts, DismissalError> {
        Ok(self.snapshot())
    }

    fn save(&self, counts: &DismissalCounts) -> Result<(), DismissalError> {
        *self.counts.lock().expect("dismissal mutex poisoned") = counts.clone();
        Ok(())
    }
}
