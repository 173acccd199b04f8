use serde::{Deserialize, Serialize};

use super::period::MonthKey;
use crate::engine::domain::{DepartmentId, UserId};

/// Who a summary row describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum KpiSubject {
    User(UserId),
    Department(DepartmentId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub subject: KpiSubject,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentId>,
    pub average_kpi: f64,
    pub task_count: usize,
    pub completed_count: usize,
    pub completion_rate: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub label: String,
    pub average_kpi: f64,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub users: Vec<KpiSummary>,
    pub departments: Vec<KpiSummary>,
    pub trend: Vec<TrendPoint>,
}

impl KpiReport {
    pub fn user(&self, user_id: &UserId) -> Option<&KpiSummary> {
        self.users
            .iter()
            .find(|summary| summary.subject == KpiSubject::User(user_id.clone()))
    }

    pub fn department(&self, department_id: &DepartmentId) -> Option<&KpiSummary> {
        self.departments
            .iter()
            .find(|summary| summary.subject == KpiSubject::Department(department_id.clone()))
    }
}
