//! Integration tests for the `tenk` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn tenk() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tenk"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tenk-sources")
        .join("tests")
        .join("fixtures")
        .join("retailer_submissions.json")
}

#[test]
fn test_select_prints_report() {
    tenk()
        .args(["select", "--year", "2023", "2024-01-15", "2023-08-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Outcome: FY 2023 -> candidate 0 (2024-01-15)",
        ));
}

#[test]
fn test_not_found_is_not_an_error() {
    tenk()
        .args(["select", "--year", "2010", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no period found for FY 2010"));
}

#[test]
fn test_require_match_fails() {
    tenk()
        .args(["--require-match", "select", "--year", "2010", "2024-01-15"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: no period found"));
}

#[test]
fn test_classify_csv() {
    tenk()
        .args(["--format", "csv", "classify", "20240731", "nope"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("index,raw_date,parsed_date,fiscal_year,selected\n")
                .and(predicate::str::contains("0,20240731,2024-07-31,2023,false"))
                .and(predicate::str::contains("1,nope,,,false")),
        );
}

#[test]
fn test_edgar_fixture() {
    tenk()
        .arg("edgar")
        .arg("--submissions")
        .arg(fixture())
        .args(["--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Document: https://www.sec.gov/Archives/edgar/data/794367/000079436724000012/m-20240203.htm",
        ));
}

#[test]
fn test_edgar_json_by_filing_date() {
    tenk()
        .args(["--format", "json", "edgar", "--role", "filing-date", "--year", "2021"])
        .arg("--submissions")
        .arg(fixture())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"label\":\"0000794367-22-000034\"")
                .and(predicate::str::contains("\"role\":\"filing-date\"")),
        );
}

#[test]
fn test_columns_falls_back_by_default() {
    tenk()
        .args(["columns", "--year", "2001", "2024-09-28", "2023-09-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("falling back to most recent candidate 0"));
}

#[test]
fn test_values_from_stdin() {
    tenk()
        .arg("values")
        .write_stdin("Sure! VALUES ('Macy''s', 2023, '2024-02-03');")
        .assert()
        .success()
        .stdout("('Macy''s', 2023, '2024-02-03')\n");
}

#[test]
fn test_bulk_insert_missing_file() {
    tenk()
        .args(["bulk-insert", "no-such-response.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read no-such-response.txt"));
}

#[test]
fn test_unknown_role() {
    tenk()
        .args(["select", "--year", "2023", "--role", "fiscal", "20240131"])
        .assert()
        .failure();
}
