//! Statement column headers as filing periods.
//!
//! Spreadsheet-style financial statements (the annual income statement and
//! balance sheet Yahoo Finance publishes, for instance) put one fiscal period
//! in each column, headed by the period-end timestamp and ordered most recent
//! first. Headers arrive as `2025-01-31`, `2025-01-31 00:00:00` or
//! `2025-01-31T00:00:00`; only the date part is classified.

use serde::Serialize;
use tenk_period::{
    DateRole, Dated, Fallback, Selection, normalize_report_date, select_filing_for_fiscal_year,
};

/// One statement column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementColumn {
    /// Header text as received
    pub header: String,
    /// Leading date part of the header
    date: String,
}

impl StatementColumn {
    /// Create a column from its header text.
    pub fn new(header: impl Into<String>) -> Self {
        let header = header.into();
        let date = date_part(&header).to_string();
        Self { header, date }
    }

    /// Column date as `YYYY-MM-DD`, if it parses.
    pub fn report_date(&self) -> Option<String> {
        normalize_report_date(&self.date)
    }
}

fn date_part(header: &str) -> &str {
    let header = header.trim();
    header
        .split_once([' ', 'T'])
        .map_or(header, |(date, _)| date)
}

impl Dated for StatementColumn {
    fn date_for(&self, role: DateRole) -> Option<&str> {
        // Statement headers are always period-end dates
        match role {
            DateRole::PeriodOfReport => Some(self.date.as_str()),
            DateRole::FilingDate => None,
        }
    }
}

/// The period columns of a statement, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementColumns {
    columns: Vec<StatementColumn>,
}

impl StatementColumns {
    /// Statement data is only a few years deep, so callers usually want the
    /// latest column rather than nothing.
    pub const DEFAULT_FALLBACK: Fallback = Fallback::MostRecent;

    /// Build from header texts, keeping their order.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: headers.into_iter().map(StatementColumn::new).collect(),
        }
    }

    /// The columns.
    pub fn columns(&self) -> &[StatementColumn] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Pick the column for fiscal year `year`.
    pub fn select_column(&self, year: i32, fallback: Fallback) -> Selection<'_, StatementColumn> {
        select_filing_for_fiscal_year(year, &self.columns, DateRole::PeriodOfReport, fallback)
    }
}

impl<S: Into<String>> FromIterator<S> for StatementColumns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_headers(iter)
    }
}
