//! Command handlers.
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! around them.

use crate::cli::{
    BulkInsertArgs, ClassifyArgs, ColumnsArgs, EdgarArgs, OutputFormat, SelectArgs, ValuesArgs,
};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tenk::output::ReportBuilder;
use tenk::period::classify_candidates;
use tenk::sources::values::{bulk_insert as build_bulk_insert, extract_values_clause};
use tenk::{
    ClassificationExport, DateRole, Dated, Exporter, Fallback, FilingPeriod, Selection,
    SelectionExport, StatementColumns, Submissions, select_filing_for_fiscal_year,
};
use tracing::{info, warn};

/// Settings shared by every command.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Options {
    pub(crate) format: OutputFormat,
    pub(crate) require_match: bool,
}

/// A finished selection ready for rendering.
struct Outcome {
    export: SelectionExport,
    trace: Vec<ClassificationExport>,
    notes: Vec<String>,
}

impl Outcome {
    fn new<T: Dated>(
        requested_year: i32,
        role: DateRole,
        candidates: &[T],
        selection: &Selection<'_, T>,
    ) -> Self {
        Self {
            export: SelectionExport::new(requested_year, role, selection),
            trace: ClassificationExport::from_trace(
                &classify_candidates(candidates, role),
                selection.index(),
            ),
            notes: Vec::new(),
        }
    }

    fn render(self, options: Options) -> Result<String> {
        if options.require_match && !self.export.found {
            bail!(
                "no period found for fiscal year {} by {}",
                self.export.requested_year,
                self.export.role
            );
        }

        match options.format.export_format() {
            Some(format) => Ok(self.export.export_to_string(format)?),
            None => {
                let mut builder = ReportBuilder::new().selection(self.export).trace(self.trace);
                for note in self.notes {
                    builder = builder.note(note);
                }
                Ok(builder.build().to_text())
            }
        }
    }
}

/// `tenk classify`
pub(crate) fn classify(args: &ClassifyArgs, options: Options) -> Result<String> {
    let candidates: Vec<FilingPeriod> = args
        .dates
        .iter()
        .map(|d| FilingPeriod::period_of_report(d.as_str()))
        .collect();
    let rows = ClassificationExport::from_trace(
        &classify_candidates(&candidates, DateRole::PeriodOfReport),
        None,
    );

    match options.format.export_format() {
        Some(format) => Ok(rows.export_to_string(format)?),
        None => Ok(ReportBuilder::new().trace(rows).build().to_text()),
    }
}

/// `tenk select`
pub(crate) fn select(args: &SelectArgs, options: Options) -> Result<String> {
    let candidates: Vec<FilingPeriod> = args
        .dates
        .iter()
        .map(|d| FilingPeriod::new(d.as_str(), args.role))
        .collect();
    let selection = select_filing_for_fiscal_year(
        args.year,
        &candidates,
        args.role,
        Fallback::from(args.fallback),
    );

    Outcome::new(args.year, args.role, &candidates, &selection).render(options)
}

/// `tenk edgar`
pub(crate) fn edgar(args: &EdgarArgs, options: Options) -> Result<String> {
    let file = File::open(&args.submissions)
        .with_context(|| format!("cannot open {}", args.submissions.display()))?;
    let submissions = Submissions::from_reader(file)
        .with_context(|| format!("cannot parse {}", args.submissions.display()))?;
    info!(cik = %submissions.cik, name = %submissions.name, "loaded submissions");

    let filings = submissions.filings_of_form(&args.form)?;
    let selection = select_filing_for_fiscal_year(
        args.year,
        &filings,
        args.role,
        Fallback::from(args.fallback),
    );

    let mut outcome = Outcome::new(args.year, args.role, &filings, &selection);
    if let Some(filing) = selection.period() {
        outcome.export = outcome.export.with_label(filing.accession_number.as_str());
        outcome
            .notes
            .push(format!("Document: {}", filing.document_url(&submissions.cik)));
    } else if filings.is_empty() {
        outcome
            .notes
            .push(format!("No {} filings for CIK {}", args.form, submissions.cik));
    }

    outcome.render(options)
}

/// `tenk columns`
pub(crate) fn columns(args: &ColumnsArgs, options: Options) -> Result<String> {
    let columns = StatementColumns::from_headers(args.headers.iter().map(String::as_str));
    let selection = columns.select_column(args.year, args.fallback());

    let mut outcome = Outcome::new(
        args.year,
        DateRole::PeriodOfReport,
        columns.columns(),
        &selection,
    );
    if let Some(column) = selection.period() {
        outcome.export = outcome.export.with_label(column.header.as_str());
    }

    outcome.render(options)
}

/// `tenk values`
pub(crate) fn values(args: &ValuesArgs) -> Result<String> {
    let response = match &args.file {
        Some(path) => read_file(path)?,
        None => io::read_to_string(io::stdin().lock()).context("cannot read stdin")?,
    };

    extract_values_clause(&response).context("no VALUES clause in response")
}

/// `tenk bulk-insert`
pub(crate) fn bulk_insert(args: &BulkInsertArgs) -> Result<String> {
    let mut clauses = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match extract_values_clause(&read_file(path)?) {
            Some(clause) => clauses.push(clause),
            None => warn!(path = %path.display(), "no VALUES clause, skipping"),
        }
    }

    info!(rows = clauses.len(), files = args.files.len(), "assembling bulk insert");
    Ok(build_bulk_insert(&clauses)?)
}

fn read_file(path: &Path) -> Result<String> {
    let mut text = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut text))
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(text)
}

/// Write `text` to stdout with exactly one trailing newline.
pub(crate) fn print(text: &str) {
    println!("{}", text.trim_end_matches('\n'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use std::path::PathBuf;

    fn scratch(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const TEXT: Options = Options {
        format: OutputFormat::Text,
        require_match: false,
    };

    fn select_args(year: i32, fallback: bool, dates: &[&str]) -> SelectArgs {
        SelectArgs {
            year,
            role: DateRole::PeriodOfReport,
            fallback,
            dates: dates.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    #[test]
    fn test_classify_text() {
        let args = ClassifyArgs {
            dates: vec!["20240731".into(), "2024-08-01".into(), "2024/08/01".into()],
        };
        let text = classify(&args, TEXT).unwrap();

        assert!(text.starts_with("Fiscal year classification\n"));
        assert!(text.contains("[0] 20240731    -> FY 2023"));
        assert!(text.contains("[1] 2024-08-01  -> FY 2024"));
        assert!(text.contains("[2] 2024/08/01  -> skipped (unparseable date)"));
    }

    #[test]
    fn test_select_matched() {
        let text = select(&select_args(2023, false, &["2024-01-15", "2023-08-20"]), TEXT).unwrap();
        assert!(text.contains("Outcome: FY 2023 -> candidate 0 (2024-01-15)"));
    }

    #[rstest]
    #[case(false, "Outcome: no period found for FY 2019")]
    #[case(true, "falling back to most recent candidate 0")]
    fn test_select_without_match(#[case] fallback: bool, #[case] expected: &str) {
        let text = select(&select_args(2019, fallback, &["20240131"]), TEXT).unwrap();
        assert!(text.contains(expected));
    }

    #[test]
    fn test_require_match() {
        let options = Options {
            require_match: true,
            ..TEXT
        };
        let err = select(&select_args(2019, false, &["20240131"]), options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "no period found for fiscal year 2019 by period-of-report"
        );

        // A fallback still counts as found
        assert!(select(&select_args(2019, true, &["20240131"]), options).is_ok());
    }

    #[test]
    fn test_select_json() {
        let options = Options {
            format: OutputFormat::Json,
            ..TEXT
        };
        let json = select(&select_args(2023, false, &["bad", "2023-09-30"]), options).unwrap();
        assert!(json.contains("\"outcome\":\"matched\""));
        assert!(json.contains("\"index\":1"));
    }

    #[test]
    fn test_columns_labels_header() {
        let args = ColumnsArgs {
            year: 2023,
            no_fallback: false,
            headers: vec!["2025-02-01 00:00:00".into(), "2024-02-03 00:00:00".into()],
        };
        let csv = columns(
            &args,
            Options {
                format: OutputFormat::Csv,
                ..TEXT
            },
        )
        .unwrap();
        assert!(csv.contains(",2024-02-03 00:00:00"));
    }

    #[test]
    fn test_edgar_prints_document_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch(
            dir.path(),
            "submissions.json",
            r#"{"cik": "0000320193", "name": "Apple Inc.", "filings": {"recent": {
                "accessionNumber": ["0000320193-23-000106"],
                "form": ["10-K"],
                "filingDate": ["2023-11-03"],
                "reportDate": ["2023-09-30"],
                "primaryDocument": ["aapl-20230930.htm"]
            }}}"#,
        );
        let args = EdgarArgs {
            submissions: path,
            year: 2023,
            form: "10-K".into(),
            role: DateRole::PeriodOfReport,
            fallback: false,
        };

        let text = edgar(&args, TEXT).unwrap();
        assert!(text.contains("(2023-09-30, 0000320193-23-000106)"));
        assert!(text.contains(
            "Document: https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm"
        ));
    }

    #[test]
    fn test_edgar_missing_file() {
        let args = EdgarArgs {
            submissions: "does/not/exist.json".into(),
            year: 2023,
            form: "10-K".into(),
            role: DateRole::PeriodOfReport,
            fallback: false,
        };
        let err = edgar(&args, TEXT).unwrap_err();
        assert!(err.to_string().starts_with("cannot open does/not/exist.json"));
    }

    #[test]
    fn test_values_and_bulk_insert() {
        let dir = tempfile::tempdir().unwrap();
        let apple = scratch(
            dir.path(),
            "apple.txt",
            "```sql\nINSERT INTO financials VALUES ('Apple Inc.', 2023, '2023-09-30');\n```",
        );
        let prose = scratch(dir.path(), "prose.txt", "   ");

        let clause = values(&ValuesArgs {
            file: Some(apple.clone()),
        })
        .unwrap();
        assert_eq!(clause, "('Apple Inc.', 2023, '2023-09-30')");

        let sql = bulk_insert(&BulkInsertArgs {
            files: vec![apple, prose],
        })
        .unwrap();
        assert!(sql.contains("VALUES\n  ('Apple Inc.', 2023, '2023-09-30')\nON DUPLICATE KEY UPDATE"));
    }

    #[test]
    fn test_bulk_insert_all_blank() {
        let dir = tempfile::tempdir().unwrap();
        let blank = scratch(dir.path(), "blank.txt", "\n");
        assert!(bulk_insert(&BulkInsertArgs { files: vec![blank] }).is_err());
    }
}
