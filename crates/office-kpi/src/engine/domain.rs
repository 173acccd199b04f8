use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for tracked tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub String);

/// Identifier wrapper for staff members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for organizational departments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

macro_rules! display_id {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )+
    };
}

display_id!(TaskId, UserId, DepartmentId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Overdue,
    /// Any status value the engine does not recognize.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentRole {
    Lead,
    Collaborate,
    Direct,
}

impl AssignmentRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Collaborate => "Collaborate",
            Self::Direct => "Direct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    Director,
    DeputyDirector,
    DepartmentHead,
    Staff,
}

impl OrgRole {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Director,
            Self::DeputyDirector,
            Self::DepartmentHead,
            Self::Staff,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::DeputyDirector => "Deputy Director",
            Self::DepartmentHead => "Department Head",
            Self::Staff => "Staff",
        }
    }
}

/// Link between a task and one of the people working on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub user_id: UserId,
    pub role: AssignmentRole,
    /// Only meaningful for [`AssignmentRole::Collaborate`].
    #[serde(default)]
    pub collaboration_completed: bool,
}

impl Assignment {
    pub fn lead(user_id: UserId) -> Self {
        Self {
            user_id,
            role: AssignmentRole::Lead,
            collaboration_completed: false,
        }
    }

    pub fn collaborator(user_id: UserId, completed: bool) -> Self {
        Self {
            user_id,
            role: AssignmentRole::Collaborate,
            collaboration_completed: completed,
        }
    }

    pub fn director(user_id: UserId) -> Self {
        Self {
            user_id,
            role: AssignmentRole::Direct,
            collaboration_completed: false,
        }
    }
}

/// Task record as supplied by the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub leadership_score: Option<f64>,
    /// Separately supplied quality rating on a 0-100 scale.
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Task {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_evaluated(&self) -> bool {
        self.leadership_score.is_some()
    }

    pub fn lead(&self) -> Option<&UserId> {
        self.assignments
            .iter()
            .find(|assignment| assignment.role == AssignmentRole::Lead)
            .map(|assignment| &assignment.user_id)
    }

    pub fn assignments_for<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments
            .iter()
            .filter(move |assignment| &assignment.user_id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    pub role: OrgRole,
    #[serde(default)]
    pub department: Option<DepartmentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    #[serde(default)]
    pub name: String,
}

/// Point-in-time copy of everything the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSnapshot {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
