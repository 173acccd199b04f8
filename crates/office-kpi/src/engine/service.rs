use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::directory::{DirectoryError, TaskDirectory};
use super::domain::{TaskId, UserId};
use super::evaluation::{submit_leadership_score, EvaluationError, EvaluationReceipt};
use super::kpi::{aggregate, KpiQuery, KpiReport};
use super::scoring::{CapBand, ScoreResult};
use super::visibility::{recovery_view, workload, Workload};

/// Service composing the task directory with the scoring, visibility, and KPI rules.
pub struct KpiService<D> {
    directory: Arc<D>,
}

/// Score of a single task with the display text for its cap band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskScoreView {
    pub task_id: TaskId,
    pub completion_score: u8,
    pub leadership_cap: u8,
    pub band: CapBand,
    pub explanation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leadership_score: Option<f64>,
}

impl<D> KpiService<D>
where
    D: TaskDirectory + 'static,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// KPI statistics for a period, optionally scoped to one department.
    pub fn kpi_statistics(
        &self,
        query: &KpiQuery,
        today: NaiveDate,
    ) -> Result<KpiReport, KpiServiceError> {
        let snapshot = self.directory.snapshot()?;
        let report = aggregate(
            &snapshot.tasks,
            &snapshot.users,
            &snapshot.departments,
            query,
            today,
        );
        debug!(
            users = report.users.len(),
            departments = report.departments.len(),
            months = report.trend.len(),
            "kpi statistics computed"
        );
        Ok(report)
    }

    /// Validates, caps, and stores a reviewer's leadership score.
    ///
    /// Concurrent submissions for the same task are not coordinated: the last
    /// successful write wins.
    pub fn submit_leadership_score(
        &self,
        task_id: &TaskId,
        proposed: f64,
        today: NaiveDate,
    ) -> Result<EvaluationReceipt, KpiServiceError> {
        let task = self
            .directory
            .task(task_id)?
            .ok_or_else(|| KpiServiceError::TaskNotFound(task_id.clone()))?;

        let receipt = submit_leadership_score(&task, proposed, today)?;
        self.directory
            .save_leadership_score(task_id, receipt.persisted_score)?;

        info!(
            task_id = %task_id,
            proposed,
            persisted = receipt.persisted_score,
            cap = receipt.score.leadership_cap,
            replaced = task.is_evaluated(),
            "leadership score stored"
        );
        Ok(receipt)
    }

    pub fn task_score(
        &self,
        task_id: &TaskId,
        today: NaiveDate,
    ) -> Result<TaskScoreView, KpiServiceError> {
        let task = self
            .directory
            .task(task_id)?
            .ok_or_else(|| KpiServiceError::TaskNotFound(task_id.clone()))?;
        let score = ScoreResult::for_task(&task, today);

        Ok(TaskScoreView {
            task_id: task.id,
            completion_score: score.completion_score,
            leadership_cap: score.leadership_cap,
            band: score.band,
            explanation: score.band.explanation(),
            leadership_score: task.leadership_score,
        })
    }

    /// Pending badge count and visible task ids for one user.
    pub fn workload(&self, user_id: &UserId) -> Result<Workload, KpiServiceError> {
        let user = self
            .directory
            .user(user_id)?
            .ok_or_else(|| KpiServiceError::UserNotFound(user_id.clone()))?;
        let snapshot = self.directory.snapshot()?;
        Ok(workload(&user, &snapshot.tasks))
    }

    /// Deleted tasks the user could restore.
    pub fn deleted_tasks(&self, user_id: &UserId) -> Result<Vec<TaskId>, KpiServiceError> {
        let user = self
            .directory
            .user(user_id)?
            .ok_or_else(|| KpiServiceError::UserNotFound(user_id.clone()))?;
        let snapshot = self.directory.snapshot()?;
        Ok(recovery_view(&user, &snapshot.tasks))
    }
}

/// Error raised by the KPI service.
#[derive(Debug, thiserror::Error)]
pub enum KpiServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    #[error("user {0} not found")]
    UserNotFound(UserId),
}
