use crate::report::{
    run_dismissals, run_kpi_report, run_task_scores, DismissalCommand, KpiReportArgs,
    TaskScoresArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use office_kpi::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Office KPI Engine",
    about = "Serve and inspect task scoring, workload visibility, and KPI statistics",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute KPI statistics for a period from an organization snapshot
    Report(KpiReportArgs),
    /// List completion scores and leadership caps for every task in a snapshot
    Scores(TaskScoresArgs),
    /// Inspect or update the local suggestion dismissal counters
    Dismissals {
        #[command(subcommand)]
        command: DismissalCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Organization snapshot (JSON) used to seed the in-memory directory
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_kpi_report(args),
        Command::Scores(args) => run_task_scores(args),
        Command::Dismissals { command } => run_dismissals(command),
    }
}
