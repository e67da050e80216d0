//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tenk::sources::edgar::ANNUAL_REPORT_FORM;
use tenk::{DateRole, ExportFormat, Fallback};

/// tenk: find the annual report that represents a fiscal year
#[derive(Debug, Parser)]
#[command(name = "tenk")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub(crate) format: OutputFormat,

    /// Log every candidate as it is classified
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Fail when no candidate is found for the requested year
    #[arg(long, global = true)]
    pub(crate) require_match: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Show the fiscal year each date represents
    Classify(ClassifyArgs),

    /// Pick the first date that represents a fiscal year
    Select(SelectArgs),

    /// Pick a filing from a saved EDGAR submissions document
    Edgar(EdgarArgs),

    /// Pick a statement column by its header date
    Columns(ColumnsArgs),

    /// Extract the VALUES clause from a model response
    Values(ValuesArgs),

    /// Join VALUES clauses into one upsert into `financials`
    BulkInsert(BulkInsertArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// CSV with a header row
    Csv,
    /// Compact JSON
    Json,
    /// Indented JSON
    PrettyJson,
}

impl OutputFormat {
    /// The export format, or `None` for the text report.
    pub(crate) const fn export_format(self) -> Option<ExportFormat> {
        match self {
            Self::Text => None,
            Self::Csv => Some(ExportFormat::Csv),
            Self::Json => Some(ExportFormat::Json),
            Self::PrettyJson => Some(ExportFormat::PrettyJson),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ClassifyArgs {
    /// Dates as YYYYMMDD or YYYY-MM-DD
    #[arg(required = true)]
    pub(crate) dates: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct SelectArgs {
    /// Fiscal year to look for
    #[arg(short, long)]
    pub(crate) year: i32,

    /// Which date the candidates carry
    #[arg(short, long, default_value_t = DateRole::PeriodOfReport)]
    pub(crate) role: DateRole,

    /// Return the first candidate when none matches
    #[arg(long)]
    pub(crate) fallback: bool,

    /// Candidate dates, most recent first
    #[arg(required = true)]
    pub(crate) dates: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct EdgarArgs {
    /// Submissions JSON as served by data.sec.gov
    #[arg(short, long)]
    pub(crate) submissions: PathBuf,

    /// Fiscal year to look for
    #[arg(short, long)]
    pub(crate) year: i32,

    /// Form type to select among
    #[arg(long, default_value = ANNUAL_REPORT_FORM)]
    pub(crate) form: String,

    /// Date to classify filings by
    #[arg(short, long, default_value_t = DateRole::PeriodOfReport)]
    pub(crate) role: DateRole,

    /// Return the most recent filing when none matches
    #[arg(long)]
    pub(crate) fallback: bool,
}

#[derive(Debug, Args)]
pub(crate) struct ColumnsArgs {
    /// Fiscal year to look for
    #[arg(short, long)]
    pub(crate) year: i32,

    /// Report "not found" instead of returning the latest column
    #[arg(long)]
    pub(crate) no_fallback: bool,

    /// Column headers in statement order
    #[arg(required = true)]
    pub(crate) headers: Vec<String>,
}

impl ColumnsArgs {
    pub(crate) const fn fallback(&self) -> Fallback {
        if self.no_fallback {
            Fallback::Disabled
        } else {
            tenk::StatementColumns::DEFAULT_FALLBACK
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ValuesArgs {
    /// File holding the response; stdin when omitted
    pub(crate) file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct BulkInsertArgs {
    /// Files each holding one response or VALUES clause
    #[arg(required = true)]
    pub(crate) files: Vec<PathBuf>,
}
