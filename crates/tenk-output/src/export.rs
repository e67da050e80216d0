//! Export of selections and classification traces.
//!
//! Records are flat so the same struct serializes cleanly to CSV and JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tenk_period::{Classification, DateRole, Dated, Selection, normalize_report_date, represented_fiscal_year};
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Outcome of a selection as a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionExport {
    /// Fiscal year that was asked for.
    pub requested_year: i32,

    /// Date role the candidates were classified by.
    pub role: DateRole,

    /// `matched`, `fallback` or `not-found`.
    pub outcome: String,

    /// Whether a candidate was returned.
    pub found: bool,

    /// Whether the returned candidate is a fallback.
    pub is_fallback: bool,

    /// Position of the returned candidate.
    pub index: Option<usize>,

    /// Raw date of the returned candidate for `role`.
    pub period_date: Option<String>,

    /// The same date as `YYYY-MM-DD`.
    pub report_date: Option<String>,

    /// Fiscal year the returned candidate represents.
    ///
    /// For a fallback this differs from `requested_year`.
    pub fiscal_year: Option<i32>,

    /// Source identifier of the returned candidate (accession number, column header).
    pub label: Option<String>,
}

impl SelectionExport {
    /// Flatten a selection.
    pub fn new<T: Dated>(requested_year: i32, role: DateRole, selection: &Selection<'_, T>) -> Self {
        let outcome = match selection {
            Selection::Matched { .. } => "matched",
            Selection::Fallback { .. } => "fallback",
            Selection::NotFound => "not-found",
        };
        let period_date = selection
            .period()
            .and_then(|p| p.date_for(role))
            .map(str::to_string);

        Self {
            requested_year,
            role,
            outcome: outcome.to_string(),
            found: selection.found(),
            is_fallback: selection.is_fallback(),
            index: selection.index(),
            report_date: period_date.as_deref().and_then(normalize_report_date),
            fiscal_year: period_date.as_deref().and_then(represented_fiscal_year),
            period_date,
            label: None,
        }
    }

    /// Attach a source identifier.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One classified candidate as a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationExport {
    /// Position in the candidate list.
    pub index: usize,

    /// Raw date text, if the candidate had one for the role.
    pub raw_date: Option<String>,

    /// Parsed date.
    pub parsed_date: Option<NaiveDate>,

    /// Fiscal year the date represents.
    pub fiscal_year: Option<i32>,

    /// Whether this candidate is the one the selector returned.
    pub selected: bool,
}

impl ClassificationExport {
    /// Flatten a trace, marking the candidate at `selected`.
    pub fn from_trace(trace: &[Classification], selected: Option<usize>) -> Vec<Self> {
        trace
            .iter()
            .map(|c| Self {
                index: c.index,
                raw_date: c.raw.clone(),
                parsed_date: c.date,
                fiscal_year: c.fiscal_year,
                selected: selected == Some(c.index),
            })
            .collect()
    }

    /// Why the candidate was not classified, if it was not.
    pub const fn skip_reason(&self) -> Option<&'static str> {
        match (&self.raw_date, &self.parsed_date) {
            (None, _) => Some("no date for role"),
            (Some(_), None) => Some("unparseable date"),
            (Some(_), Some(_)) => None,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_csv<'a, T, I>(records: I) -> Result<String, ExportError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for SelectionExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv([self]),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for ClassificationExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv([self]),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<ClassificationExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
