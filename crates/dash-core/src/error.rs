// File: crates/dash-core/src/error.rs
// Summary: Error type for dataset, reference table and config loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required key column is not present in the header row.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// `row` is 1-based and counts data rows only (header excluded).
    #[error("row {row}: cannot parse period '{value}'")]
    InvalidPeriod { row: usize, value: String },

    #[error("config error: {0}")]
    Config(String),
}
