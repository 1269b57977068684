//! Report error types.

use frostline_shared::AppError;
use thiserror::Error;

/// Errors that can occur while computing report figures.
///
/// All of them are local to one figure; callers render "N/A" and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Input the aggregator cannot give a meaning to.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A ratio was requested against a zero denominator.
    #[error("Division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    /// A figure does not fit in a `Decimal`.
    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err {
            ReportError::InvalidInput(msg) => Self::Validation(msg),
            ReportError::DivisionByZero(_) | ReportError::Overflow(_) => Self::Report(message),
        }
    }
}
