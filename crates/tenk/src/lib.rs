#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export main types from sub-crates
pub use tenk_output as output;
pub use tenk_period as period;
pub use tenk_sources as sources;

// Re-export the selection core
pub use tenk_output::{ClassificationExport, ExportFormat, Exporter, Report, SelectionExport};
pub use tenk_period::{
    DateRole, Dated, Fallback, FilingPeriod, FiscalYearQuery, Selection, SelectorConfig,
    select_filing_for_fiscal_year,
};
pub use tenk_sources::{edgar::Submissions, statements::StatementColumns};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
