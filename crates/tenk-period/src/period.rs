//! Filing periods and the date roles they carry.

use crate::error::PeriodError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which date of a filing is being classified.
///
/// Both roles go through the same month-boundary rule. They are kept apart
/// because a period-end date and a submission date mean different things,
/// and callers must say which one they are handing over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateRole {
    /// End of the reporting period covered by the filing
    #[default]
    #[display("period-of-report")]
    PeriodOfReport,
    /// Date the filing was submitted
    #[display("filing-date")]
    FilingDate,
}

impl FromStr for DateRole {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "period" | "period-of-report" | "report" | "report-date" => Ok(Self::PeriodOfReport),
            "filing" | "filing-date" | "filed" => Ok(Self::FilingDate),
            _ => Err(PeriodError::UnknownRole(s.to_string())),
        }
    }
}

/// Anything that can hand over a date string for a given role.
///
/// Each data source implements this for its own record type so the
/// selection rule lives in one place instead of once per integration.
pub trait Dated {
    /// The raw date for `role`, or `None` if this record has no such date.
    fn date_for(&self, role: DateRole) -> Option<&str>;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date_for(&self, role: DateRole) -> Option<&str> {
        (**self).date_for(role)
    }
}

/// One reporting period available for a company.
///
/// Built fresh from each query response and dropped after selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilingPeriod {
    /// Raw date text, `YYYYMMDD` or `YYYY-MM-DD`
    pub period_date: String,
    /// What `period_date` means
    pub role: DateRole,
}

impl FilingPeriod {
    /// Create a filing period.
    pub fn new(period_date: impl Into<String>, role: DateRole) -> Self {
        Self {
            period_date: period_date.into(),
            role,
        }
    }

    /// Create a period whose date is the period of report.
    pub fn period_of_report(period_date: impl Into<String>) -> Self {
        Self::new(period_date, DateRole::PeriodOfReport)
    }

    /// Create a period whose date is the filing date.
    pub fn filing_date(period_date: impl Into<String>) -> Self {
        Self::new(period_date, DateRole::FilingDate)
    }
}

impl Dated for FilingPeriod {
    fn date_for(&self, role: DateRole) -> Option<&str> {
        (self.role == role).then_some(self.period_date.as_str())
    }
}
