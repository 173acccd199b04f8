use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};
use office_kpi::config::AppConfig;
use office_kpi::dismissal::{DismissalThrottle, JsonFileStore, DISMISSAL_THRESHOLD};
use office_kpi::engine::kpi::aggregate;
use office_kpi::engine::{
    load_snapshot, DepartmentId, KpiQuery, KpiReport, KpiSummary, ReportingPeriod, ScoreResult,
};
use office_kpi::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct KpiReportArgs {
    /// Organization snapshot (JSON) with departments, users, and tasks
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: NaiveDate,
    /// Last day of the reporting period, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end: NaiveDate,
    /// Restrict the report to one department id
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Evaluation date for open tasks (defaults to today, UTC)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TaskScoresArgs {
    /// Organization snapshot (JSON) with departments, users, and tasks
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Evaluation date for open tasks (defaults to today, UTC)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum DismissalCommand {
    /// Count one dismissal of a suggestion category
    Record {
        /// Suggestion category identifier
        category: String,
    },
    /// Show dismissal counts and blacklisted categories
    List,
}

pub(crate) fn run_kpi_report(args: KpiReportArgs) -> Result<(), AppError> {
    let KpiReportArgs {
        snapshot,
        start,
        end,
        department,
        today,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let period = ReportingPeriod::new(start, end)?;
    let mut query = KpiQuery::new(period);
    if let Some(department) = department {
        query = query.for_department(DepartmentId(department));
    }

    let organization = load_snapshot(&snapshot)?;
    let report = aggregate(
        &organization.tasks,
        &organization.users,
        &organization.departments,
        &query,
        today,
    );

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{rendered}");
    } else {
        render_kpi_report(&report, &period, today);
    }
    Ok(())
}

pub(crate) fn run_task_scores(args: TaskScoresArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let organization = load_snapshot(&args.snapshot)?;

    println!("Task scores as of {}", today);
    let mut listed = 0usize;
    for task in organization.tasks.iter().filter(|task| !task.is_deleted()) {
        let score = ScoreResult::for_task(task, today);
        let leadership = task
            .leadership_score
            .map(|value| format!("{value:.1}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "- {} [{}] due {} | completion {} | cap {} | leadership {}",
            task.id,
            task.status.label(),
            task.deadline,
            score.completion_score,
            score.leadership_cap,
            leadership
        );
        println!("    {}", score.band.explanation());
        listed += 1;
    }

    if listed == 0 {
        println!("  No active tasks in snapshot.");
    }
    Ok(())
}

pub(crate) fn run_dismissals(command: DismissalCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = JsonFileStore::new(&config.data.dismissal_store);
    let throttle = DismissalThrottle::open(store)?;

    match command {
        DismissalCommand::Record { category } => {
            let count = throttle.record_dismissal(&category)?;
            if throttle.is_blacklisted(&category)? {
                println!("{category}: {count} dismissals, hidden from suggestions");
            } else {
                println!(
                    "{category}: {count} of {DISMISSAL_THRESHOLD} dismissals before it is hidden"
                );
            }
        }
        DismissalCommand::List => {
            let blacklist = throttle.current_blacklist()?;
            println!(
                "Dismissal store: {}",
                config.data.dismissal_store.display()
            );
            if blacklist.is_empty() {
                println!("  No hidden suggestion categories.");
            } else {
                println!("Hidden suggestion categories:");
                for category in &blacklist {
                    println!(
                        "  - {} ({} dismissals)",
                        category,
                        throttle.dismissals(category)?
                    );
                }
            }
        }
    }
    Ok(())
}

fn render_kpi_report(report: &KpiReport, period: &ReportingPeriod, today: NaiveDate) {
    println!(
        "KPI report {} to {} (evaluated {})",
        period.start(),
        period.end(),
        today
    );

    println!("\nStaff ranking");
    render_summaries(&report.users);

    println!("\nDepartments");
    render_summaries(&report.departments);

    println!("\nMonthly trend");
    if report.trend.is_empty() {
        println!("  No months in period.");
    }
    for point in &report.trend {
        println!(
            "  - {}: {:.1} avg over {} tasks",
            point.label, point.average_kpi, point.task_count
        );
    }
}

fn render_summaries(summaries: &[KpiSummary]) {
    if summaries.is_empty() {
        println!("  Nothing to report.");
        return;
    }
    for summary in summaries {
        println!(
            "  {:>2}. {} | {:.1} avg KPI | {}/{} completed ({:.0}%)",
            summary.rank,
            summary.name,
            summary.average_kpi,
            summary.completed_count,
            summary.task_count,
            summary.completion_rate * 100.0
        );
    }
}
