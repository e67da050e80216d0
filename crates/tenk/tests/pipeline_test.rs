//! End-to-end: submissions document to selection report.

use std::fs::File;
use std::path::PathBuf;
use tenk::output::ReportBuilder;
use tenk::period::classify_candidates;
use tenk::{
    ClassificationExport, DateRole, ExportFormat, Exporter, Fallback, SelectionExport,
    Submissions, select_filing_for_fiscal_year,
};

fn submissions() -> Submissions {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tenk-sources")
        .join("tests")
        .join("fixtures")
        .join("retailer_submissions.json");
    Submissions::from_reader(File::open(path).unwrap()).unwrap()
}

#[test]
fn test_annual_report_to_report() {
    let submissions = submissions();
    let filings = submissions.annual_reports().unwrap();

    let selection =
        select_filing_for_fiscal_year(2022, &filings, DateRole::PeriodOfReport, Fallback::Disabled);
    let filing = selection.period().unwrap();
    assert_eq!(filing.report_date.as_deref(), Some("2023-01-28"));

    let export = SelectionExport::new(2022, DateRole::PeriodOfReport, &selection)
        .with_label(filing.accession_number.clone());
    let trace = ClassificationExport::from_trace(
        &classify_candidates(&filings, DateRole::PeriodOfReport),
        selection.index(),
    );

    let text = ReportBuilder::new()
        .selection(export.clone())
        .trace(trace)
        .note(filing.document_url(&submissions.cik))
        .build()
        .to_text();

    assert!(text.contains("[1] 2023-01-28  -> FY 2022  *"));
    assert!(text.contains("Outcome: FY 2022 -> candidate 1 (2023-01-28, 0000794367-23-000021)"));
    assert!(text.contains(
        "https://www.sec.gov/Archives/edgar/data/794367/000079436723000021/m-20230128.htm"
    ));

    let csv = export.export_to_string(ExportFormat::Csv).unwrap();
    assert!(csv.lines().nth(1).unwrap().ends_with(",0000794367-23-000021"));
}

#[test]
fn test_fallback_by_filing_date() {
    let filings = submissions().annual_reports().unwrap();

    let selection =
        select_filing_for_fiscal_year(2015, &filings, DateRole::FilingDate, Fallback::MostRecent);
    assert!(selection.is_fallback());

    let export = SelectionExport::new(2015, DateRole::FilingDate, &selection);
    assert_eq!(export.period_date.as_deref(), Some("2024-03-22"));
    // Filed in March, so the fallback represents the prior fiscal year
    assert_eq!(export.fiscal_year, Some(2023));
}
