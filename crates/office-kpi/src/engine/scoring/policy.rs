//! Scoring policy constants. Every threshold the calculator and aggregator use lives here.

pub const MAX_COMPLETION_SCORE: u8 = 120;

/// Score when the engine cannot classify a task.
pub const NEUTRAL_SCORE: u8 = 50;

/// Score for a completed task that carries no completion date.
pub const MISSING_COMPLETION_DATE_SCORE: u8 = 100;

/// Completion more than this many days early earns the top band.
pub const EARLY_COMPLETION_DAYS: i64 = 7;

/// Completion at most this many days late earns the slightly-late band.
pub const GRACE_LATE_DAYS: i64 = 3;

pub const VERY_EARLY_SCORE: u8 = 120;
pub const EARLY_SCORE: u8 = 110;
pub const ON_TIME_SCORE: u8 = 100;
pub const SLIGHTLY_LATE_SCORE: u8 = 90;
pub const LATE_SCORE: u8 = 80;

/// Base score for open tasks before progress or deadline decay.
pub const OPEN_TASK_BASE_SCORE: i64 = 50;

/// Points lost per day of approach for tasks that have not started.
pub const NOT_STARTED_DECAY_PER_DAY: i64 = 2;

/// Leadership cap bands as `(minimum completion score, cap)`, highest first.
pub const LEADERSHIP_CAP_BANDS: [(u8, u8); 4] = [(110, 10), (100, 8), (90, 6), (80, 4)];

/// Cap for any positive completion score below the lowest band.
pub const PARTIAL_CREDIT_CAP: u8 = 2;

/// Cap for a zero completion score.
pub const FLOOR_CAP: u8 = 1;

pub const MAX_LEADERSHIP_SCORE: f64 = 10.0;

/// Upper bound of a supplied quality rating.
pub const MAX_QUALITY_SCORE: f64 = 100.0;

/// Weight of the completion score in a task's realized KPI.
pub const COMPLETION_WEIGHT: f64 = 0.7;

/// Weight of the quality score in a task's realized KPI.
pub const QUALITY_WEIGHT: f64 = 0.3;

/// Multiplier converting a 0-10 leadership score into a 0-100 quality score.
pub const LEADERSHIP_TO_QUALITY: f64 = 10.0;
