//! Plain-text reports of a classification run.

use crate::export::{ClassificationExport, SelectionExport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A report of how candidates were classified and what was chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Heading line.
    pub title: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Selection outcome, absent for a pure classification run.
    pub selection: Option<SelectionExport>,

    /// Per-candidate trace.
    pub trace: Vec<ClassificationExport>,

    /// Extra lines printed after the outcome.
    pub notes: Vec<String>,
}

impl Report {
    /// Create a new report.
    pub fn new(
        title: String,
        selection: Option<SelectionExport>,
        trace: Vec<ClassificationExport>,
    ) -> Self {
        Self {
            title,
            timestamp: Utc::now(),
            selection,
            trace,
            notes: Vec::new(),
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render for a terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        let width = self
            .trace
            .iter()
            .filter_map(|c| c.raw_date.as_ref().map(String::len))
            .max()
            .unwrap_or(0)
            .max(6);

        for row in &self.trace {
            let raw = row.raw_date.as_deref().unwrap_or("(none)");
            let verdict = match (row.fiscal_year, row.skip_reason()) {
                (Some(fy), _) => format!("FY {fy}"),
                (None, Some(reason)) => format!("skipped ({reason})"),
                (None, None) => "skipped".to_string(),
            };
            let marker = if row.selected { "  *" } else { "" };
            let _ = writeln!(out, "  [{}] {raw:<width$}  -> {verdict}{marker}", row.index);
        }

        if let Some(selection) = &self.selection {
            let _ = writeln!(out, "{}", outcome_line(selection));
        }

        for note in &self.notes {
            let _ = writeln!(out, "{note}");
        }

        out
    }

    /// Write the JSON form to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn outcome_line(selection: &SelectionExport) -> String {
    let date = selection
        .report_date
        .as_deref()
        .or(selection.period_date.as_deref())
        .unwrap_or("?");
    let label = selection
        .label
        .as_deref()
        .map(|l| format!(", {l}"))
        .unwrap_or_default();

    match (selection.found, selection.is_fallback, selection.index) {
        (true, false, Some(index)) => format!(
            "Outcome: FY {} -> candidate {index} ({date}{label})",
            selection.requested_year
        ),
        (true, true, Some(index)) => {
            let actual = selection
                .fiscal_year
                .map_or_else(|| "unknown year".to_string(), |fy| format!("FY {fy}"));
            format!(
                "Outcome: no period for FY {}; falling back to most recent candidate {index} ({date}{label}, {actual})",
                selection.requested_year
            )
        }
        _ => format!(
            "Outcome: no period found for FY {} by {}",
            selection.requested_year, selection.role
        ),
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    selection: Option<SelectionExport>,
    trace: Vec<ClassificationExport>,
    notes: Vec<String>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the selection outcome.
    pub fn selection(mut self, selection: SelectionExport) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Set the per-candidate trace.
    pub fn trace(mut self, trace: Vec<ClassificationExport>) -> Self {
        self.trace = trace;
        self
    }

    /// Append a note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Build the report.
    ///
    /// Without an explicit title, one is derived from the selection.
    pub fn build(self) -> Report {
        let title = self.title.unwrap_or_else(|| match &self.selection {
            Some(s) => format!("Fiscal year {} by {}", s.requested_year, s.role),
            None => "Fiscal year classification".to_string(),
        });

        let mut report = Report::new(title, self.selection, self.trace);
        report.notes = self.notes;
        report
    }
}
