pub mod assessment;
pub mod config;
pub mod error;
pub mod reporting;
pub mod telemetry;
