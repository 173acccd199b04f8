//! Evaluation and visibility rules for office tasks.
//!
//! Scoring, evaluation, visibility, and KPI aggregation are pure functions of task
//! and user records plus an explicit `today`. The service and router wrap them for
//! callers that fetch records through a [`TaskDirectory`].

pub mod directory;
pub mod domain;
pub mod evaluation;
pub mod kpi;
pub mod router;
pub mod scoring;
pub mod service;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use directory::{load_snapshot, DirectoryError, SnapshotError, TaskDirectory};
pub use domain::{
    Assignment, AssignmentRole, Department, DepartmentId, OrgRole, OrganizationSnapshot, Task,
    TaskId, TaskStatus, User, UserId,
};
pub use evaluation::{EvaluationError, EvaluationReceipt};
pub use kpi::{KpiQuery, KpiReport, KpiSubject, KpiSummary, ReportingPeriod, TrendPoint};
pub use router::kpi_router;
pub use scoring::{CapBand, ScoreResult};
pub use service::{KpiService, KpiServiceError, TaskScoreView};
pub use visibility::{VisibilityRule, Workload};
