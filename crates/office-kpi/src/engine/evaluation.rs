use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Task, TaskId};
use super::scoring::ScoreResult;

/// Validation errors raised when a reviewer submits a leadership score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("score out of range: leadership score must be a non-negative number (got {0})")]
    ScoreOutOfRange(f64),
}

/// Accepted leadership score together with the scoring context it was checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReceipt {
    pub task_id: TaskId,
    pub proposed_score: f64,
    pub persisted_score: f64,
    pub clamped: bool,
    pub score: ScoreResult,
}

/// Checks a proposed leadership score against the cap implied by the task's current state.
///
/// Negative (or non-numeric) proposals are rejected. Proposals above the cap are
/// floored to the cap without error, and re-submitting replaces any earlier score.
pub fn submit_leadership_score(
    task: &Task,
    proposed: f64,
    today: NaiveDate,
) -> Result<EvaluationReceipt, EvaluationError> {
    if !proposed.is_finite() || proposed < 0.0 {
        return Err(EvaluationError::ScoreOutOfRange(proposed));
    }

    let score = ScoreResult::for_task(task, today);
    let cap = f64::from(score.leadership_cap);
    let persisted_score = proposed.min(cap);

    Ok(EvaluationReceipt {
        task_id: task.id.clone(),
        proposed_score: proposed,
        persisted_score,
        clamped: persisted_score < proposed,
        score,
    })
}

/// Applies a receipt to the task record, replacing any previous leadership score.
pub fn apply_receipt(task: &mut Task, receipt: &EvaluationReceipt) {
    task.leadership_score = Some(receipt.persisted_score);
}
