//! Fiscal-year filing selection.
//!
//! Given a requested fiscal year and an ordered list of candidate periods,
//! pick the first candidate whose date classifies to that year. The scan is
//! a single pass with no state, so the same input always yields the same
//! answer and callers may run it from any number of threads.

use crate::config::SelectorConfig;
use crate::date::{fiscal_year_of, parse_period_date};
use crate::period::{DateRole, Dated, FilingPeriod};
use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when no candidate matches the requested year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// Report "not found"
    #[default]
    #[display("disabled")]
    Disabled,
    /// Hand back the first candidate, flagged as a fallback
    #[display("most-recent")]
    MostRecent,
}

impl Fallback {
    /// Whether a fallback candidate may be returned.
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::MostRecent)
    }
}

impl From<bool> for Fallback {
    fn from(fallback_to_most_recent: bool) -> Self {
        if fallback_to_most_recent {
            Self::MostRecent
        } else {
            Self::Disabled
        }
    }
}

/// Outcome of a selection.
///
/// A [`Selection::Fallback`] is not a match: the period it carries belongs
/// to some other fiscal year. Check [`Selection::is_fallback`] before
/// treating the period as data for the requested year.
#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a, T> {
    /// A candidate classified to the requested year
    Matched {
        /// Position in the candidate list
        index: usize,
        /// The chosen candidate
        period: &'a T,
        /// Fiscal year the candidate represents (equal to the requested year)
        fiscal_year: i32,
    },
    /// Nothing matched; the first candidate is returned as a best effort
    Fallback {
        /// The first candidate in the list
        period: &'a T,
    },
    /// Nothing matched and no fallback applied
    NotFound,
}

impl<T> Clone for Selection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selection<'_, T> {}

impl<'a, T> Selection<'a, T> {
    /// Whether a period was returned, exact or fallback.
    pub const fn found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// Whether the returned period is a fallback rather than a match.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Whether a candidate matched the requested year exactly.
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// The returned period, if any.
    pub const fn period(&self) -> Option<&'a T> {
        match self {
            Self::Matched { period, .. } | Self::Fallback { period } => Some(*period),
            Self::NotFound => None,
        }
    }

    /// Position of the returned period in the candidate list.
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Matched { index, .. } => Some(*index),
            Self::Fallback { .. } => Some(0),
            Self::NotFound => None,
        }
    }

    /// Fiscal year of an exact match.
    pub const fn fiscal_year(&self) -> Option<i32> {
        match self {
            Self::Matched { fiscal_year, .. } => Some(*fiscal_year),
            _ => None,
        }
    }

    /// Apply `f` to the returned period, keeping the outcome kind.
    pub fn map<'b, U>(self, f: impl FnOnce(&'a T) -> &'b U) -> Selection<'b, U> {
        match self {
            Self::Matched {
                index,
                period,
                fiscal_year,
            } => Selection::Matched {
                index,
                period: f(period),
                fiscal_year,
            },
            Self::Fallback { period } => Selection::Fallback { period: f(period) },
            Self::NotFound => Selection::NotFound,
        }
    }
}

/// Select the candidate that represents `requested_year`.
///
/// Candidates are scanned in input order and the first whose date for
/// `role` classifies to `requested_year` is returned. Candidates without a
/// date for `role`, or whose date does not parse, are skipped. When nothing
/// matches, `fallback` decides between [`Selection::NotFound`] and the first
/// candidate as a [`Selection::Fallback`]; an empty list is always
/// [`Selection::NotFound`].
///
/// # Example
/// ```
/// use tenk_period::{DateRole, Fallback, FilingPeriod, select_filing_for_fiscal_year};
///
/// let candidates = vec![
///     FilingPeriod::period_of_report("2024-01-15"),
///     FilingPeriod::period_of_report("2023-08-20"),
///     FilingPeriod::period_of_report("2022-12-01"),
/// ];
///
/// let selection =
///     select_filing_for_fiscal_year(2023, &candidates, DateRole::PeriodOfReport, Fallback::Disabled);
/// assert_eq!(selection.index(), Some(0));
/// assert_eq!(selection.fiscal_year(), Some(2023));
/// ```
pub fn select_filing_for_fiscal_year<T: Dated>(
    requested_year: i32,
    candidates: &[T],
    role: DateRole,
    fallback: Fallback,
) -> Selection<'_, T> {
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(raw) = candidate.date_for(role) else {
            debug!(index, %role, "candidate has no date for role, skipping");
            continue;
        };

        let date = match parse_period_date(raw) {
            Ok(date) => date,
            Err(err) => {
                debug!(index, raw, %err, "skipping unparseable period date");
                continue;
            }
        };

        let fiscal_year = fiscal_year_of(date);
        debug!(index, %date, fiscal_year, requested_year, "classified period");

        if fiscal_year == requested_year {
            debug!(index, %date, requested_year, "selected period");
            return Selection::Matched {
                index,
                period: candidate,
                fiscal_year,
            };
        }
    }

    match (fallback, candidates.first()) {
        (Fallback::MostRecent, Some(first)) => {
            warn!(
                requested_year,
                %role,
                "no period found for fiscal year, using most recent candidate"
            );
            Selection::Fallback { period: first }
        }
        _ => {
            debug!(requested_year, %role, candidates = candidates.len(), "no period found");
            Selection::NotFound
        }
    }
}

/// One line of the decision trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Position in the candidate list
    pub index: usize,
    /// Raw date text for the role, if the candidate had one
    pub raw: Option<String>,
    /// Parsed date, if the text was recognized
    pub date: Option<NaiveDate>,
    /// Fiscal year the date represents
    pub fiscal_year: Option<i32>,
}

impl Classification {
    /// Whether this candidate classifies to `year`.
    pub fn represents(&self, year: i32) -> bool {
        self.fiscal_year == Some(year)
    }
}

/// Classify every candidate without stopping at a match.
///
/// Used to explain a selection: which dates were skipped and which year
/// each remaining one represents.
pub fn classify_candidates<T: Dated>(candidates: &[T], role: DateRole) -> Vec<Classification> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let raw = candidate.date_for(role);
            let date = raw.and_then(|r| parse_period_date(r).ok());
            Classification {
                index,
                raw: raw.map(str::to_string),
                date,
                fiscal_year: date.map(fiscal_year_of),
            }
        })
        .collect()
}

/// Distinct fiscal years represented by the candidates, in first-seen order.
pub fn available_fiscal_years<T: Dated>(candidates: &[T], role: DateRole) -> Vec<i32> {
    let mut years = Vec::new();
    for year in classify_candidates(candidates, role)
        .into_iter()
        .filter_map(|c| c.fiscal_year)
    {
        if !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

/// A requested fiscal year together with the periods to search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearQuery<T = FilingPeriod> {
    /// Fiscal year being asked for
    pub requested_year: i32,
    /// Candidates in source order, usually most recent first
    pub candidates: Vec<T>,
}

impl<T: Dated> FiscalYearQuery<T> {
    /// Create a query.
    pub const fn new(requested_year: i32, candidates: Vec<T>) -> Self {
        Self {
            requested_year,
            candidates,
        }
    }

    /// Run the selection.
    pub fn select(&self, role: DateRole, fallback: Fallback) -> Selection<'_, T> {
        select_filing_for_fiscal_year(self.requested_year, &self.candidates, role, fallback)
    }

    /// Run the selection with a stored policy.
    pub fn select_with(&self, config: &SelectorConfig) -> Selection<'_, T> {
        self.select(config.role, config.fallback)
    }

    /// Decision trace for every candidate.
    pub fn classify(&self, role: DateRole) -> Vec<Classification> {
        classify_candidates(&self.candidates, role)
    }
}
