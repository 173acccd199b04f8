use std::fs;
use std::path::{Path, PathBuf};

use super::domain::{OrganizationSnapshot, Task, TaskId, User, UserId};

/// Read access to task and user records plus the one write the engine performs.
///
/// Implementations hand out owned copies so each engine call works on a stable
/// snapshot; nothing here needs to be transactionally consistent across calls.
pub trait TaskDirectory: Send + Sync {
    fn snapshot(&self) -> Result<OrganizationSnapshot, DirectoryError>;
    fn task(&self, id: &TaskId) -> Result<Option<Task>, DirectoryError>;
    fn user(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
    fn save_leadership_score(&self, id: &TaskId, score: f64) -> Result<(), DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads an organization snapshot exported as JSON.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<OrganizationSnapshot, SnapshotError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
