//! SQL `VALUES` extraction and bulk insert assembly.
//!
//! A language model asked for one row of the `financials` table answers with
//! free text: sometimes a bare tuple, sometimes a whole `INSERT`, sometimes
//! wrapped in a code fence. [`extract_values_clause`] reduces that to the
//! tuple, and [`bulk_insert`] joins many tuples into one upsert.

use crate::error::{Result, SourceError};
use regex::Regex;
use std::sync::LazyLock;

/// Target table.
pub const FINANCIALS_TABLE: &str = "financials";

/// Columns of the `financials` table, as they appear in SQL.
pub const FINANCIALS_COLUMNS: [&str; 16] = [
    "company_name",
    "year",
    "reportDate",
    "`Net Revenue`",
    "`Cost of Goods`",
    "`Gross Margin`",
    "`SGA`",
    "`Operating Profit`",
    "`Net Profit`",
    "`Inventory`",
    "`Current Assets`",
    "`Total Assets`",
    "`Current Liabilities`",
    "`Liabilities`",
    "`Total Shareholder Equity`",
    "`Total Liabilities and Shareholder Equity`",
];

/// Primary key columns; never overwritten on conflict.
const KEY_COLUMNS: [&str; 2] = ["company_name", "year"];

static VALUES_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bvalues\b\s*").expect("static regex is valid")
});

/// Pull the `VALUES` tuple(s) out of a model response.
///
/// Looks for the `VALUES` keyword (any case) and keeps what follows it.
/// Without the keyword, keeps everything from the first `(`; without either,
/// keeps the whole response. Surrounding whitespace, a trailing code fence
/// and trailing semicolons are removed. Returns `None` when nothing is left.
///
/// # Example
/// ```
/// # use tenk_sources::values::extract_values_clause;
/// let response = "INSERT INTO financials (company_name, year) VALUES ('Apple', 2023);";
/// assert_eq!(extract_values_clause(response).as_deref(), Some("('Apple', 2023)"));
/// ```
pub fn extract_values_clause(response: &str) -> Option<String> {
    let tail = match VALUES_KEYWORD.find(response) {
        Some(m) => &response[m.end()..],
        None => response.find('(').map_or(response, |start| &response[start..]),
    };

    let clause = tail
        .trim()
        .trim_end_matches("```")
        .trim_end()
        .trim_end_matches(';')
        .trim();

    (!clause.is_empty()).then(|| clause.to_string())
}

/// Build one upsert for many `VALUES` tuples.
///
/// Every non-key column is refreshed from the incoming row on duplicate key.
///
/// # Errors
/// Returns [`SourceError::MissingData`] when `values` is empty or holds
/// only blank clauses.
pub fn bulk_insert<S: AsRef<str>>(values: &[S]) -> Result<String> {
    let rows: Vec<String> = values
        .iter()
        .map(|v| v.as_ref().trim().trim_end_matches(';').trim_end().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(SourceError::MissingData {
            subject: FINANCIALS_TABLE.to_string(),
            reason: "no VALUES clauses to insert".to_string(),
        });
    }

    let columns = FINANCIALS_COLUMNS
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join(",\n");

    let rows = rows
        .iter()
        .map(|r| format!("  {r}"))
        .collect::<Vec<_>>()
        .join(",\n");

    let updates = FINANCIALS_COLUMNS
        .iter()
        .filter(|c| !KEY_COLUMNS.contains(*c))
        .map(|c| format!("  {c} = VALUES({c})"))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "INSERT INTO {FINANCIALS_TABLE} (\n{columns}\n)\nVALUES\n{rows}\nON DUPLICATE KEY UPDATE\n{updates};"
    ))
}
