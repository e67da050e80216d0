#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tenk/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod edgar;
pub mod error;
pub mod statements;
pub mod values;

pub use error::{Result, SourceError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
