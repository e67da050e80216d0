//! Error types for period parsing.

use thiserror::Error;

/// Result type for period operations.
pub type Result<T> = std::result::Result<T, PeriodError>;

/// Errors raised while interpreting period dates and roles.
///
/// None of these escape [`select_filing_for_fiscal_year`](crate::select_filing_for_fiscal_year):
/// a candidate whose date fails to parse is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The date string was empty or whitespace
    #[error("Empty period date")]
    Empty,

    /// The date string matched neither `YYYYMMDD` nor `YYYY-MM-DD`
    #[error("Unrecognized period date format: {0:?}")]
    UnrecognizedFormat(String),

    /// The date string had the right shape but is not a calendar date
    #[error("Invalid calendar date: {0:?}")]
    InvalidDate(String),

    /// A date role name that is not one of the known roles
    #[error("Unknown date role: {0:?} (expected period-of-report or filing-date)")]
    UnknownRole(String),
}
