use serde::{Deserialize, Serialize};

use super::domain::{Assignment, AssignmentRole, OrgRole, Task, TaskId, User, UserId};

/// How a role decides which tasks are pending and which are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityRule {
    /// Every task in the organization; pending while not completed.
    OrganizationWide,
    /// Tasks where the user holds any assignment; pending while not completed.
    AnyAssignment,
    /// Tasks where the user holds any assignment; pending is decided per assignment role.
    PerAssignment,
}

/// Role to rule policy. Counting and filtering both dispatch through it, and the
/// match keeps every role covered.
pub const fn rule_for(role: OrgRole) -> VisibilityRule {
    match role {
        OrgRole::Director => VisibilityRule::OrganizationWide,
        OrgRole::DeputyDirector => VisibilityRule::AnyAssignment,
        OrgRole::DepartmentHead | OrgRole::Staff => VisibilityRule::PerAssignment,
    }
}

impl VisibilityRule {
    fn covers(self, held: &[&Assignment]) -> bool {
        match self {
            Self::OrganizationWide => true,
            Self::AnyAssignment | Self::PerAssignment => !held.is_empty(),
        }
    }

    fn pending(self, task: &Task, held: &[&Assignment]) -> bool {
        match self {
            Self::OrganizationWide | Self::AnyAssignment => {
                self.covers(held) && !task.status.is_completed()
            }
            Self::PerAssignment => held
                .iter()
                .any(|assignment| assignment_is_pending(assignment, task)),
        }
    }
}

/// Per-assignment pending rule used by department heads and staff.
pub fn assignment_is_pending(assignment: &Assignment, task: &Task) -> bool {
    match assignment.role {
        AssignmentRole::Lead => !task.status.is_completed(),
        AssignmentRole::Collaborate => !assignment.collaboration_completed,
        AssignmentRole::Direct => false,
    }
}

/// Whether `task` counts toward the badge of a user with `role` holding `held` on it.
pub fn is_pending(role: OrgRole, task: &Task, held: &[&Assignment]) -> bool {
    !task.is_deleted() && rule_for(role).pending(task, held)
}

/// Whether `task` appears in the default list view for a user with `role` holding `held`.
pub fn is_visible(role: OrgRole, task: &Task, held: &[&Assignment]) -> bool {
    !task.is_deleted() && rule_for(role).covers(held)
}

/// Pending and visible flags for one (user, task) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub pending: bool,
    pub visible: bool,
}

pub fn classify(user: &User, task: &Task) -> Classification {
    let held: Vec<&Assignment> = task.assignments_for(&user.id).collect();
    Classification {
        pending: is_pending(user.role, task, &held),
        visible: is_visible(user.role, task, &held),
    }
}

/// Badge count and list contents for a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub user_id: UserId,
    pub role: OrgRole,
    pub rule: VisibilityRule,
    pub pending_count: usize,
    pub visible_task_ids: Vec<TaskId>,
}

pub fn workload(user: &User, tasks: &[Task]) -> Workload {
    let mut pending_count = 0;
    let mut visible_task_ids = Vec::new();

    for task in tasks {
        let classification = classify(user, task);
        if classification.pending {
            pending_count += 1;
        }
        if classification.visible {
            visible_task_ids.push(task.id.clone());
        }
    }

    Workload {
        user_id: user.id.clone(),
        role: user.role,
        rule: rule_for(user.role),
        pending_count,
        visible_task_ids,
    }
}

/// Deleted tasks the user would otherwise see, for the recovery view.
pub fn recovery_view(user: &User, tasks: &[Task]) -> Vec<TaskId> {
    let rule = rule_for(user.role);
    tasks
        .iter()
        .filter(|task| task.is_deleted())
        .filter(|task| {
            let held: Vec<&Assignment> = task.assignments_for(&user.id).collect();
            rule.covers(&held)
        })
        .map(|task| task.id.clone())
        .collect()
}
