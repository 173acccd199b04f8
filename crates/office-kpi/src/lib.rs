pub mod config;
pub mod dismissal;
pub mod engine;
pub mod error;
pub mod telemetry;
