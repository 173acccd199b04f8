pub mod policy;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Task, TaskStatus};
use policy::*;

/// Completion score plus the leadership cap it implies. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub completion_score: u8,
    pub leadership_cap: u8,
    pub band: CapBand,
}

impl ScoreResult {
    pub fn for_task(task: &Task, today: NaiveDate) -> Self {
        let completion_score = completion_score(task, today);
        let band = CapBand::for_score(completion_score);
        Self {
            completion_score,
            leadership_cap: band.cap(),
            band,
        }
    }
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn completion_score(task: &Task, today: NaiveDate) -> u8 {
    match task.status {
        TaskStatus::Completed => match task.completed_at {
            Some(completed_at) => completed_score(days_between(task.deadline, completed_at)),
            None => MISSING_COMPLETION_DATE_SCORE,
        },
        TaskStatus::InProgress => {
            if days_between(task.deadline, today) > 0 {
                return 0;
            }
            let progress = i64::from(task.progress.min(100));
            clamp_score(OPEN_TASK_BASE_SCORE + progress / 2)
        }
        TaskStatus::NotStarted => {
            let days_past_due = days_between(task.deadline, today);
            if days_past_due > 0 {
                return 0;
            }
            clamp_score(OPEN_TASK_BASE_SCORE + NOT_STARTED_DECAY_PER_DAY * days_past_due)
        }
        TaskStatus::Overdue | TaskStatus::Unknown => NEUTRAL_SCORE,
    }
}

fn completed_score(delta_days: i64) -> u8 {
    match delta_days {
        d if d < -EARLY_COMPLETION_DAYS => VERY_EARLY_SCORE,
        d if d < 0 => EARLY_SCORE,
        0 => ON_TIME_SCORE,
        d if d <= GRACE_LATE_DAYS => SLIGHTLY_LATE_SCORE,
        _ => LATE_SCORE,
    }
}

fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, i64::from(MAX_COMPLETION_SCORE)) as u8
}

pub fn leadership_cap(completion_score: u8) -> u8 {
    CapBand::for_score(completion_score).cap()
}

/// The six leadership-cap bands, from the highest cap to the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapBand {
    AheadOfSchedule,
    OnTime,
    SlightlyLate,
    Late,
    PartialCredit,
    NoCredit,
}

impl CapBand {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::AheadOfSchedule,
            Self::OnTime,
            Self::SlightlyLate,
            Self::Late,
            Self::PartialCredit,
            Self::NoCredit,
        ]
    }

    pub fn for_score(completion_score: u8) -> Self {
        let banded = [
            Self::AheadOfSchedule,
            Self::OnTime,
            Self::SlightlyLate,
            Self::Late,
        ];
        for ((minimum, _), band) in LEADERSHIP_CAP_BANDS.iter().zip(banded) {
            if completion_score >= *minimum {
                return band;
            }
        }
        if completion_score > 0 {
            Self::PartialCredit
        } else {
            Self::NoCredit
        }
    }

    pub const fn cap(self) -> u8 {
        match self {
            Self::AheadOfSchedule => LEADERSHIP_CAP_BANDS[0].1,
            Self::OnTime => LEADERSHIP_CAP_BANDS[1].1,
            Self::SlightlyLate => LEADERSHIP_CAP_BANDS[2].1,
            Self::Late => LEADERSHIP_CAP_BANDS[3].1,
            Self::PartialCredit => PARTIAL_CREDIT_CAP,
            Self::NoCredit => FLOOR_CAP,
        }
    }

    pub const fn explanation(self) -> &'static str {
        match self {
            Self::AheadOfSchedule => {
                "Completion score of 110 or more: finished ahead of schedule, leadership score up to 10"
            }
            Self::OnTime => "Completion score of 100 to 109: finished on time, leadership score up to 8",
            Self::SlightlyLate => {
                "Completion score of 90 to 99: finished up to 3 days late, leadership score up to 6"
            }
            Self::Late => {
                "Completion score of 80 to 89: finished more than 3 days late, leadership score up to 4"
            }
            Self::PartialCredit => {
                "Completion score between 1 and 79: work still open, leadership score up to 2"
            }
            Self::NoCredit => {
                "Completion score of 0: deadline missed while open, leadership score up to 1"
            }
        }
    }
}
