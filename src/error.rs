use crate::types::Denominator;
use thiserror::Error;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload could not be parsed as a spreadsheet at all.
    #[error("Could not read spreadsheet: {0}")]
    Decode(String),

    /// The table lacks the concept label column. The only fatal input condition.
    #[error("Unrecognized file format: {0}")]
    Structural(String),

    #[error("Division by zero: {0} is zero")]
    DivisionByZero(Denominator),

    /// A ratio overflowed to infinity or NaN.
    #[error("Ratio out of range: {0} is not a finite number")]
    NonFiniteRatio(&'static str),

    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ReportError {
    /// True for the conditions that stop the pipeline before any report exists.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ReportError::Decode(_) | ReportError::Structural(_))
    }
}
