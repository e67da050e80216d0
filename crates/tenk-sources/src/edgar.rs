//! SEC EDGAR submissions documents.
//!
//! The submissions API (`https://data.sec.gov/submissions/CIK##########.json`)
//! returns recent filings as parallel arrays where each index is one filing,
//! most recent first. This module reads a saved copy of that document and
//! turns its rows into [`EdgarFiling`] records that the period selector can
//! classify by either their report date or their filing date.

use crate::error::{Result, SourceError};
use serde::Deserialize;
use std::io::Read;
use tenk_period::{
    DateRole, Dated, Fallback, SelectorConfig, available_fiscal_years,
    select_filing_for_fiscal_year,
};
use tracing::debug;

/// Form type of an annual report.
pub const ANNUAL_REPORT_FORM: &str = "10-K";

/// Base URL for filing documents.
const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// Keep only the digits of a CIK.
///
/// Users paste CIKs as `CIK0000320193`, `0000-320193` and so on; EDGAR only
/// cares about the number.
///
/// # Errors
/// Returns [`SourceError::InvalidCik`] if `raw` contains no digits.
///
/// # Example
/// ```
/// # use tenk_sources::edgar::clean_cik;
/// assert_eq!(clean_cik("CIK 0000320193").unwrap(), "0000320193");
/// assert!(clean_cik("Apple").is_err());
/// ```
pub fn clean_cik(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(SourceError::InvalidCik(raw.to_string()));
    }
    Ok(digits)
}

/// Pad CIK to 10 digits as required by the submissions API.
///
/// # Example
/// ```
/// # use tenk_sources::edgar::pad_cik;
/// assert_eq!(pad_cik("320193"), "0000320193");
/// ```
pub fn pad_cik(cik: &str) -> String {
    format!("{:0>10}", cik)
}

/// Company submissions document.
#[derive(Debug, Clone, Deserialize)]
pub struct Submissions {
    /// Central Index Key
    pub cik: String,
    /// Company name
    pub name: String,
    /// Filing history
    pub filings: FilingHistory,
}

/// Container for filing history data.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingHistory {
    /// Recent filings
    pub recent: RecentFilings,
}

/// Recent filings as parallel arrays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (unique filing identifiers)
    pub accession_number: Vec<String>,
    /// Form types (e.g., "10-K", "10-Q", "8-K")
    pub form: Vec<String>,
    /// Filing dates in YYYY-MM-DD format
    pub filing_date: Vec<String>,
    /// Period-of-report dates; empty strings for forms without one
    #[serde(default)]
    pub report_date: Vec<String>,
    /// Primary document filenames
    #[serde(default)]
    pub primary_document: Vec<String>,
}

impl RecentFilings {
    /// Number of filings, after checking the arrays line up.
    ///
    /// `reportDate` and `primaryDocument` may be missing altogether; when
    /// present they must match the other arrays.
    ///
    /// # Errors
    /// Returns [`SourceError::Parse`] when the arrays disagree in length.
    pub fn len(&self) -> Result<usize> {
        let n = self.accession_number.len();
        let required = [("form", self.form.len()), ("filingDate", self.filing_date.len())];
        let optional = [
            ("reportDate", self.report_date.len()),
            ("primaryDocument", self.primary_document.len()),
        ];

        for (name, len) in required {
            if len != n {
                return Err(SourceError::Parse(format!(
                    "{name} has {len} entries, accessionNumber has {n}"
                )));
            }
        }
        for (name, len) in optional {
            if len != 0 && len != n {
                return Err(SourceError::Parse(format!(
                    "{name} has {len} entries, accessionNumber has {n}"
                )));
            }
        }

        Ok(n)
    }

    /// Whether there are no filings.
    pub fn is_empty(&self) -> bool {
        self.accession_number.is_empty()
    }

    fn filing_at_index(&self, idx: usize) -> EdgarFiling {
        let report_date = self
            .report_date
            .get(idx)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        EdgarFiling {
            accession_number: self.accession_number[idx].clone(),
            form: self.form[idx].clone(),
            filing_date: self.filing_date[idx].clone(),
            report_date,
            primary_document: self.primary_document.get(idx).cloned().unwrap_or_default(),
        }
    }
}

/// One row of the submissions document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarFiling {
    /// Accession number (unique filing identifier)
    pub accession_number: String,
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Date the filing was submitted
    pub filing_date: String,
    /// End of the reporting period, if the form has one
    pub report_date: Option<String>,
    /// Primary document filename; empty if the document did not list one
    pub primary_document: String,
}

impl EdgarFiling {
    /// URL of the primary document, or of the filing folder if there is none.
    ///
    /// # Example
    /// ```
    /// # use tenk_sources::edgar::EdgarFiling;
    /// let filing = EdgarFiling {
    ///     accession_number: "0000320193-23-000106".to_string(),
    ///     form: "10-K".to_string(),
    ///     filing_date: "2023-11-03".to_string(),
    ///     report_date: Some("2023-09-30".to_string()),
    ///     primary_document: "aapl-20230930.htm".to_string(),
    /// };
    /// assert_eq!(
    ///     filing.document_url("0000320193"),
    ///     "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm"
    /// );
    /// ```
    pub fn document_url(&self, cik: &str) -> String {
        // Archive paths use the unpadded CIK and the accession number without dashes
        let cik = cik.trim_start_matches('0');
        let accession_no_dashes = self.accession_number.replace('-', "");

        if self.primary_document.is_empty() {
            format!("{ARCHIVES_BASE_URL}/{cik}/{accession_no_dashes}/")
        } else {
            format!(
                "{ARCHIVES_BASE_URL}/{cik}/{accession_no_dashes}/{}",
                self.primary_document
            )
        }
    }
}

impl Dated for EdgarFiling {
    fn date_for(&self, role: DateRole) -> Option<&str> {
        match role {
            DateRole::PeriodOfReport => self.report_date.as_deref(),
            DateRole::FilingDate => Some(self.filing_date.as_str()),
        }
    }
}

impl Submissions {
    /// Parse a submissions document from JSON text.
    ///
    /// # Errors
    /// Returns [`SourceError::Serialization`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a submissions document from a reader.
    ///
    /// # Errors
    /// Returns [`SourceError::Serialization`] for malformed JSON or read failures.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// All filings of `form`, in document order (most recent first).
    ///
    /// # Errors
    /// Returns [`SourceError::Parse`] when the parallel arrays disagree in length.
    pub fn filings_of_form(&self, form: &str) -> Result<Vec<EdgarFiling>> {
        let recent = &self.filings.recent;
        let n = recent.len()?;

        let filings: Vec<EdgarFiling> = (0..n)
            .filter(|&i| recent.form[i].eq_ignore_ascii_case(form))
            .map(|i| recent.filing_at_index(i))
            .collect();

        debug!(
            cik = %self.cik,
            form,
            total = n,
            matching = filings.len(),
            "filtered submissions by form"
        );
        Ok(filings)
    }

    /// All 10-K filings, most recent first.
    ///
    /// # Errors
    /// See [`Submissions::filings_of_form`].
    pub fn annual_reports(&self) -> Result<Vec<EdgarFiling>> {
        self.filings_of_form(ANNUAL_REPORT_FORM)
    }

    /// The 10-K that represents fiscal year `year`, with no fallback.
    ///
    /// # Errors
    /// Returns [`SourceError::FilingNotFound`] when no 10-K classifies to
    /// `year`, naming the years that are available.
    pub fn annual_report_for(&self, year: i32, role: DateRole) -> Result<EdgarFiling> {
        let filings = self.annual_reports()?;
        let selection = select_filing_for_fiscal_year(year, &filings, role, Fallback::Disabled);

        match selection.period() {
            Some(filing) => Ok(filing.clone()),
            None => Err(SourceError::FilingNotFound(format!(
                "no {ANNUAL_REPORT_FORM} for CIK {} in fiscal year {year} by {role} (available: {:?})",
                self.cik,
                available_fiscal_years(&filings, role)
            ))),
        }
    }

    /// Apply a stored policy to the filings of `form`.
    ///
    /// Returns the filings together with the index the selector chose and
    /// whether that choice is a fallback.
    ///
    /// # Errors
    /// See [`Submissions::filings_of_form`].
    pub fn select_with(
        &self,
        form: &str,
        year: i32,
        config: &SelectorConfig,
    ) -> Result<(Vec<EdgarFiling>, Option<(usize, bool)>)> {
        let filings = self.filings_of_form(form)?;
        let selection = select_filing_for_fiscal_year(year, &filings, config.role, config.fallback);
        let chosen = selection.index().map(|i| (i, selection.is_fallback()));
        Ok((filings, chosen))
    }
}
