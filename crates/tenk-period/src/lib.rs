#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod date;
pub mod error;
pub mod period;
pub mod selector;

pub use config::SelectorConfig;
pub use date::{
    LAST_PRIOR_YEAR_MONTH, fiscal_year_for, fiscal_year_of, normalize_report_date,
    parse_period_date, represented_fiscal_year,
};
pub use error::{PeriodError, Result};
pub use period::{DateRole, Dated, FilingPeriod};
pub use selector::{
    Classification, Fallback, FiscalYearQuery, Selection, available_fiscal_years,
    classify_candidates, select_filing_for_fiscal_year,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
