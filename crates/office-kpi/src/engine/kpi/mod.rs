mod period;
pub mod views;

pub use period::{MonthKey, PeriodError, ReportingPeriod};
pub use views::{KpiReport, KpiSubject, KpiSummary, TrendPoint};

use std::collections::HashMap;

use chrono::NaiveDate;

use super::domain::{Department, DepartmentId, Task, User, UserId};
use super::scoring::completion_score;
use super::scoring::policy::{
    COMPLETION_WEIGHT, LEADERSHIP_TO_QUALITY, MAX_LEADERSHIP_SCORE, MAX_QUALITY_SCORE,
    QUALITY_WEIGHT,
};

/// Parameters of a KPI statistics request.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiQuery {
    pub period: ReportingPeriod,
    pub department: Option<DepartmentId>,
}

impl KpiQuery {
    pub fn new(period: ReportingPeriod) -> Self {
        Self {
            period,
            department: None,
        }
    }

    pub fn for_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }
}

/// Quality component of a task on a 0-100 scale.
///
/// Non-finite ratings are ignored and out-of-range ones are clamped, so a bad
/// record cannot push an average outside the score range.
pub fn quality_score(task: &Task) -> f64 {
    task.quality_score
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, MAX_QUALITY_SCORE))
        .or_else(|| {
            task.leadership_score
                .filter(|score| score.is_finite())
                .map(|score| score.clamp(0.0, MAX_LEADERSHIP_SCORE) * LEADERSHIP_TO_QUALITY)
        })
        .unwrap_or(0.0)
}

/// Weighted blend of completion and quality for one task.
pub fn realized_score(task: &Task, today: NaiveDate) -> f64 {
    COMPLETION_WEIGHT * f64::from(completion_score(task, today))
        + QUALITY_WEIGHT * quality_score(task)
}

fn qualifies(task: &Task, period: &ReportingPeriod) -> bool {
    period.contains(task.deadline) || task.completed_at.is_some_and(|date| period.contains(date))
}

fn bucket_date(task: &Task, period: &ReportingPeriod) -> NaiveDate {
    task.completed_at
        .filter(|date| period.contains(*date))
        .unwrap_or(task.deadline)
}

#[derive(Debug, Default, Clone)]
struct Tally {
    score_total: f64,
    tasks: usize,
    completed: usize,
}

impl Tally {
    fn add(&mut self, score: f64, completed: bool) {
        self.score_total += score;
        self.tasks += 1;
        if completed {
            self.completed += 1;
        }
    }

    fn average(&self) -> f64 {
        if self.tasks == 0 {
            0.0
        } else {
            self.score_total / self.tasks as f64
        }
    }

    fn completion_rate(&self) -> f64 {
        if self.tasks == 0 {
            0.0
        } else {
            self.completed as f64 / self.tasks as f64
        }
    }
}

/// Folds a task snapshot into per-user, per-department, and monthly KPI figures.
pub fn aggregate(
    tasks: &[Task],
    users: &[User],
    departments: &[Department],
    query: &KpiQuery,
    today: NaiveDate,
) -> KpiReport {
    let period = &query.period;
    let scoped_users: Vec<&User> = users
        .iter()
        .filter(|user| match &query.department {
            Some(department) => user.department.as_ref() == Some(department),
            None => true,
        })
        .collect();

    let mut by_user: HashMap<&UserId, Tally> = HashMap::new();
    let mut by_month: HashMap<MonthKey, Tally> = HashMap::new();

    for task in tasks {
        if task.is_deleted() || !qualifies(task, period) {
            continue;
        }
        let Some(lead) = task.lead() else {
            continue;
        };
        let Some(owner) = scoped_users.iter().find(|user| &user.id == lead) else {
            continue;
        };

        let score = realized_score(task, today);
        let completed = task.status.is_completed();
        by_user.entry(&owner.id).or_default().add(score, completed);
        by_month
            .entry(MonthKey::of(bucket_date(task, period)))
            .or_default()
            .add(score, completed);
    }

    let empty = Tally::default();
    let mut user_rows: Vec<KpiSummary> = scoped_users
        .iter()
        .map(|user| {
            let tally = by_user.get(&user.id).unwrap_or(&empty);
            KpiSummary {
                subject: KpiSubject::User(user.id.clone()),
                name: user.name.clone(),
                department: user.department.clone(),
                average_kpi: tally.average(),
                task_count: tally.tasks,
                completed_count: tally.completed,
                completion_rate: tally.completion_rate(),
                rank: 0,
            }
        })
        .collect();

    let mut department_rows: Vec<KpiSummary> = department_order(&scoped_users, departments)
        .into_iter()
        .map(|(id, name)| summarize_department(id, name, &user_rows))
        .collect();

    assign_ranks(&mut user_rows);
    assign_ranks(&mut department_rows);

    let trend = period
        .months()
        .into_iter()
        .map(|month| {
            let tally = by_month.get(&month).unwrap_or(&empty);
            TrendPoint {
                month,
                label: month.label(),
                average_kpi: tally.average(),
                task_count: tally.tasks,
            }
        })
        .collect();

    KpiReport {
        users: user_rows,
        departments: department_rows,
        trend,
    }
}

/// Departments with at least one scoped member, in directory order, then any
/// department referenced only by a user record.
fn department_order(
    scoped_users: &[&User],
    departments: &[Department],
) -> Vec<(DepartmentId, String)> {
    let mut ordered: Vec<(DepartmentId, String)> = departments
        .iter()
        .filter(|department| {
            scoped_users
                .iter()
                .any(|user| user.department.as_ref() == Some(&department.id))
        })
        .map(|department| (department.id.clone(), department.name.clone()))
        .collect();

    for user in scoped_users {
        if let Some(id) = &user.department {
            if !ordered.iter().any(|(known, _)| known == id) {
                ordered.push((id.clone(), id.0.clone()));
            }
        }
    }
    ordered
}

fn summarize_department(id: DepartmentId, name: String, user_rows: &[KpiSummary]) -> KpiSummary {
    let members: Vec<&KpiSummary> = user_rows
        .iter()
        .filter(|row| row.department.as_ref() == Some(&id))
        .collect();

    // Every member row counts, including members with no tasks in the period.
    let average_kpi = if members.is_empty() {
        0.0
    } else {
        members.iter().map(|row| row.average_kpi).sum::<f64>() / members.len() as f64
    };
    let task_count: usize = members.iter().map(|row| row.task_count).sum();
    let completed_count: usize = members.iter().map(|row| row.completed_count).sum();
    let completion_rate = if task_count == 0 {
        0.0
    } else {
        completed_count as f64 / task_count as f64
    };

    KpiSummary {
        subject: KpiSubject::Department(id),
        name,
        department: None,
        average_kpi,
        task_count,
        completed_count,
        completion_rate,
        rank: 0,
    }
}

/// Orders rows by average KPI, highest first; ties keep input order.
fn assign_ranks(rows: &mut [KpiSummary]) {
    rows.sort_by(|a, b| b.average_kpi.total_cmp(&a.average_kpi));
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }
}
