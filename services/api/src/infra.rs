use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use office_kpi::engine::{
    load_snapshot, DirectoryError, OrganizationSnapshot, SnapshotError, Task, TaskDirectory,
    TaskId, User, UserId,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local directory backed by a JSON snapshot loaded at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    snapshot: Arc<RwLock<OrganizationSnapshot>>,
}

impl InMemoryDirectory {
    pub(crate) fn new(snapshot: OrganizationSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    pub(crate) fn from_optional_path(path: Option<&Path>) -> Result<Self, SnapshotError> {
        match path {
            Some(path) => {
                let snapshot = load_snapshot(path)?;
                info!(
                    path = %path.display(),
                    users = snapshot.users.len(),
                    tasks = snapshot.tasks.len(),
                    "organization snapshot loaded"
                );
                Ok(Self::new(snapshot))
            }
            None => Ok(Self::default()),
        }
    }
}

impl TaskDirectory for InMemoryDirectory {
    fn snapshot(&self) -> Result<OrganizationSnapshot, DirectoryError> {
        let guard = self.snapshot.read().expect("directory lock poisoned");
        Ok(guard.clone())
    }

    fn task(&self, id: &TaskId) -> Result<Option<Task>, DirectoryError> {
        let guard = self.snapshot.read().expect("directory lock poisoned");
        Ok(guard.tasks.iter().find(|task| &task.id == id).cloned())
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let guard = self.snapshot.read().expect("directory lock poisoned");
        Ok(guard.users.iter().find(|user| &user.id == id).cloned())
    }

    fn save_leadership_score(&self, id: &TaskId, score: f64) -> Result<(), DirectoryError> {
        let mut guard = self.snapshot.write().expect("directory lock poisoned");
        let task = guard
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or(DirectoryError::NotFound)?;
        task.leadership_score = Some(score);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
