use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::engine::directory::{DirectoryError, TaskDirectory};
use crate::engine::domain::{
    Assignment, Department, DepartmentId, OrgRole, OrganizationSnapshot, Task, TaskId, TaskStatus,
    User, UserId,
};
use crate::engine::{kpi_router, KpiService};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 11, 20)
}

pub(super) fn uid(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn tid(id: &str) -> TaskId {
    TaskId(id.to_string())
}

fn user(id: &str, name: &str, role: OrgRole, department: Option<&str>) -> User {
    User {
        id: uid(id),
        name: name.to_string(),
        role,
        department: department.map(|id| DepartmentId(id.to_string())),
    }
}

fn task(id: &str, status: TaskStatus, deadline: NaiveDate, assignments: Vec<Assignment>) -> Task {
    Task {
        id: tid(id),
        title: id.replace('-', " "),
        status,
        deadline,
        completed_at: None,
        progress: 0,
        leadership_score: None,
        quality_score: None,
        deleted_at: None,
        assignments,
    }
}

/// Small office: two departments, six people, six tasks (one deleted).
pub(super) fn office_snapshot() -> OrganizationSnapshot {
    let mut early = task(
        "t-early",
        TaskStatus::Completed,
        date(2024, 11, 10),
        vec![
            Assignment::lead(uid("ana")),
            Assignment::collaborator(uid("ben"), false),
        ],
    );
    early.completed_at = Some(date(2024, 11, 8));

    let mut late = task(
        "t-late",
        TaskStatus::Completed,
        date(2024, 11, 10),
        vec![Assignment::lead(uid("ben"))],
    );
    late.completed_at = Some(date(2024, 11, 14));

    let mut open = task(
        "t-open",
        TaskStatus::InProgress,
        date(2024, 11, 25),
        vec![
            Assignment::lead(uid("ana")),
            Assignment::collaborator(uid("cho"), true),
            Assignment::director(uid("head-ops")),
        ],
    );
    open.progress = 40;

    let mut stale = task(
        "t-stale",
        TaskStatus::InProgress,
        date(2024, 11, 15),
        vec![Assignment::lead(uid("cho")), Assignment::director(uid("dep"))],
    );
    stale.progress = 70;

    let fresh = task(
        "t-new",
        TaskStatus::NotStarted,
        date(2024, 11, 30),
        vec![Assignment::lead(uid("ben"))],
    );

    let mut removed = task(
        "t-removed",
        TaskStatus::InProgress,
        date(2024, 11, 18),
        vec![Assignment::lead(uid("ana"))],
    );
    removed.deleted_at = Some(
        Utc.with_ymd_and_hms(2024, 11, 12, 8, 30, 0)
            .single()
            .expect("valid timestamp"),
    );

    OrganizationSnapshot {
        departments: vec![
            Department {
                id: DepartmentId("ops".to_string()),
                name: "Operations".to_string(),
            },
            Department {
                id: DepartmentId("finance".to_string()),
                name: "Finance".to_string(),
            },
        ],
        users: vec![
            user("dir", "Dana Director", OrgRole::Director, None),
            user("dep", "Deniz Deputy", OrgRole::DeputyDirector, None),
            user("head-ops", "Hana Head", OrgRole::DepartmentHead, Some("ops")),
            user("ana", "Ana", OrgRole::Staff, Some("ops")),
            user("ben", "Ben", OrgRole::Staff, Some("ops")),
            user("cho", "Cho", OrgRole::Staff, Some("finance")),
        ],
        tasks: vec![early, late, open, stale, fresh, removed],
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) snapshot: Arc<Mutex<OrganizationSnapshot>>,
}

impl MemoryDirectory {
    pub(super) fn seeded() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(office_snapshot())),
        }
    }

    pub(super) fn stored_score(&self, id: &str) -> Option<f64> {
        let guard = self.snapshot.lock().expect("directory mutex poisoned");
        guard
            .tasks
            .iter()
            .find(|task| task.id.0 == id)
            .and_then(|task| task.leadership_score)
    }
}

impl TaskDirectory for MemoryDirectory {
    fn snapshot(&self) -> Result<OrganizationSnapshot, DirectoryError> {
        Ok(self
            .snapshot
            .lock()
            .expect("directory mutex poisoned")
            .clone())
    }

    fn task(&self, id: &TaskId) -> Result<Option<Task>, DirectoryError> {
        let guard = self.snapshot.lock().expect("directory mutex poisoned");
        Ok(guard.tasks.iter().find(|task| &task.id == id).cloned())
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        let guard = self.snapshot.lock().expect("directory mutex poisoned");
        Ok(guard.users.iter().find(|user| &user.id == id).cloned())
    }

    fn save_leadership_score(&self, id: &TaskId, score: f64) -> Result<(), DirectoryError> {
        let mut guard = self.snapshot.lock().expect("directory mutex poisoned");
        let task = guard
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or(DirectoryError::NotFound)?;
        task.leadership_score = Some(score);
        Ok(())
    }
}

pub(super) struct UnavailableDirectory;

impl TaskDirectory for UnavailableDirectory {
    fn snapshot(&self) -> Result<OrganizationSnapshot, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn task(&self, _id: &TaskId) -> Result<Option<Task>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn user(&self, _id: &UserId) -> Result<Option<User>, DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }

    fn save_leadership_score(&self, _id: &TaskId, _score: f64) -> Result<(), DirectoryError> {
        Err(DirectoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (KpiService<MemoryDirectory>, Arc<MemoryDirectory>) {
    let directory = Arc::new(MemoryDirectory::seeded());
    let service = KpiService::new(directory.clone());
    (service, directory)
}

pub(super) fn router_with_service(service: KpiService<MemoryDirectory>) -> axum::Router {
    kpi_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
