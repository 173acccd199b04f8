use chrono::{Duration, NaiveDate};
use office_kpi::engine::evaluation::submit_leadership_score;
use office_kpi::engine::kpi::{aggregate, KpiQuery, ReportingPeriod};
use office_kpi::engine::scoring::{completion_score, leadership_cap, ScoreResult};
use office_kpi::engine::visibility::{classify, workload};
use office_kpi::engine::{
    Assignment, DepartmentId, EvaluationError, OrgRole, Task, TaskId, TaskStatus, User, UserId,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn task(status: TaskStatus, deadline: NaiveDate) -> Task {
    Task {
        id: TaskId("t-1".to_string()),
        title: "Budget memo".to_string(),
        status,
        deadline,
        completed_at: None,
        progress: 0,
        leadership_score: None,
        quality_score: None,
        deleted_at: None,
        assignments: vec![Assignment::lead(UserId("lead".to_string()))],
    }
}

#[test]
fn completed_two_days_early_earns_full_cap() {
    let mut early = task(TaskStatus::Completed, date(2024, 11, 10));
    early.completed_at = Some(date(2024, 11, 8));

    let result = ScoreResult::for_task(&early, date(2024, 11, 30));
    assert_eq!(result.completion_score, 110);
    assert_eq!(result.leadership_cap, 10);
}

#[test]
fn completed_four_days_late_floors_a_high_proposal() {
    let mut late = task(TaskStatus::Completed, date(2024, 11, 10));
    late.completed_at = Some(date(2024, 11, 14));

    let result = ScoreResult::for_task(&late, date(2024, 11, 30));
    assert_eq!(result.completion_score, 80);
    assert_eq!(result.leadership_cap, 4);

    let receipt = submit_leadership_score(&late, 9.0, date(2024, 11, 30)).expect("accepted");
    assert_eq!(receipt.persisted_score, 4.0);
}

#[test]
fn in_progress_past_deadline_scores_zero() {
    let today = date(2024, 11, 15);
    let mut stale = task(TaskStatus::InProgress, today - Duration::days(5));
    stale.progress = 70;

    assert_eq!(completion_score(&stale, today), 0);
    assert_eq!(leadership_cap(completion_score(&stale, today)), 1);
}

#[test]
fn not_started_ten_days_out_scores_thirty() {
    let today = date(2024, 11, 15);
    let pending = task(TaskStatus::NotStarted, today + Duration::days(10));

    assert_eq!(completion_score(&pending, today), 30);
    assert_eq!(leadership_cap(30), 2);
}

#[test]
fn negative_scores_are_always_rejected() {
    let mut late = task(TaskStatus::Completed, date(2024, 11, 10));
    late.completed_at = Some(date(2024, 11, 14));

    for proposed in [-0.1, -1.0, -100.0] {
        assert_eq!(
            submit_leadership_score(&late, proposed, date(2024, 11, 30)),
            Err(EvaluationError::ScoreOutOfRange(proposed))
        );
    }
}

#[test]
fn department_average_weights_members_equally() {
    let users = vec![
        User {
            id: UserId("busy".to_string()),
            name: "Busy".to_string(),
            role: OrgRole::Staff,
            department: Some(DepartmentId("records".to_string())),
        },
        User {
            id: UserId("light".to_string()),
            name: "Light".to_string(),
            role: OrgRole::Staff,
            department: Some(DepartmentId("records".to_string())),
        },
    ];

    let mut tasks = Vec::new();
    for n in 0..20 {
        let mut busy = task(TaskStatus::Completed, date(2024, 11, 10));
        busy.id = TaskId(format!("busy-{n}"));
        busy.completed_at = Some(date(2024, 11, 11));
        busy.quality_score = Some(90.0);
        busy.assignments = vec![Assignment::lead(UserId("busy".to_string()))];
        tasks.push(busy);
    }
    for n in 0..2 {
        let mut light = task(TaskStatus::Completed, date(2024, 11, 10));
        light.id = TaskId(format!("light-{n}"));
        light.completed_at = Some(date(2024, 11, 10));
        light.assignments = vec![Assignment::lead(UserId("light".to_string()))];
        tasks.push(light);
    }

    let query = KpiQuery::new(ReportingPeriod::month(2024, 11).expect("valid month"));
    let report = aggregate(&tasks, &users, &[], &query, date(2024, 11, 30));
    let records = report
        .department(&DepartmentId("records".to_string()))
        .expect("department row");

    assert!((records.average_kpi - 80.0).abs() < 1e-9);
    assert_eq!(records.task_count, 22);
}

#[test]
fn finished_collaboration_never_counts_as_pending() {
    let staff = User {
        id: UserId("helper".to_string()),
        name: "Helper".to_string(),
        role: OrgRole::Staff,
        department: None,
    };
    let mut open = task(TaskStatus::InProgress, date(2024, 12, 1));
    open.assignments
        .push(Assignment::collaborator(UserId("helper".to_string()), true));

    assert!(!classify(&staff, &open).pending);
    assert_eq!(workload(&staff, &[open]).pending_count, 0);
}
