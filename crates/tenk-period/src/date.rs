//! Period date parsing and fiscal-year classification.
//!
//! Two textual encodings are recognized:
//! - `YYYYMMDD`, the contiguous form EDGAR uses for period of report
//! - `YYYY-MM-DD`, the hyphenated form used for filing dates and statement headers

use crate::error::{PeriodError, Result};
use chrono::{Datelike, NaiveDate};

/// Last calendar month whose dates are attributed to the previous fiscal year.
///
/// July belongs to the previous fiscal year; August starts the same-year branch.
pub const LAST_PRIOR_YEAR_MONTH: u32 = 7;

/// Parse a period date in `YYYYMMDD` or `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored. The digits must describe a real
/// calendar date.
///
/// # Errors
/// Returns [`PeriodError::Empty`] for blank input,
/// [`PeriodError::UnrecognizedFormat`] for any other shape and
/// [`PeriodError::InvalidDate`] for impossible dates such as `20230231`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use tenk_period::parse_period_date;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
/// assert_eq!(parse_period_date("20230630").unwrap(), expected);
/// assert_eq!(parse_period_date("2023-06-30").unwrap(), expected);
/// assert!(parse_period_date("2023/06/30").is_err());
/// ```
pub fn parse_period_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(PeriodError::Empty);
    }

    let bytes = s.as_bytes();
    let (year, month, day) = match bytes.len() {
        8 if all_digits(bytes) => (&s[0..4], &s[4..6], &s[6..8]),
        10 if bytes[4] == b'-'
            && bytes[7] == b'-'
            && all_digits(&bytes[0..4])
            && all_digits(&bytes[5..7])
            && all_digits(&bytes[8..10]) =>
        {
            (&s[0..4], &s[5..7], &s[8..10])
        }
        _ => return Err(PeriodError::UnrecognizedFormat(s.to_string())),
    };

    let unrecognized = || PeriodError::UnrecognizedFormat(s.to_string());
    let year: i32 = year.parse().map_err(|_| unrecognized())?;
    let month: u32 = month.parse().map_err(|_| unrecognized())?;
    let day: u32 = day.parse().map_err(|_| unrecognized())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| PeriodError::InvalidDate(s.to_string()))
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// Fiscal year represented by a period in `month` of calendar `year`.
///
/// # Example
/// ```
/// use tenk_period::fiscal_year_for;
///
/// assert_eq!(fiscal_year_for(2024, 7), 2023);
/// assert_eq!(fiscal_year_for(2024, 8), 2024);
/// ```
pub const fn fiscal_year_for(year: i32, month: u32) -> i32 {
    if month <= LAST_PRIOR_YEAR_MONTH {
        year - 1
    } else {
        year
    }
}

/// Fiscal year represented by a parsed period date.
pub fn fiscal_year_of(date: NaiveDate) -> i32 {
    fiscal_year_for(date.year(), date.month())
}

/// Parse and classify in one step; `None` when the date is unparseable.
pub fn represented_fiscal_year(raw: &str) -> Option<i32> {
    parse_period_date(raw).ok().map(fiscal_year_of)
}

/// Render either accepted encoding as `YYYY-MM-DD`.
///
/// Downstream SQL expects the hyphenated form even when the filing
/// reported `YYYYMMDD`.
pub fn normalize_report_date(raw: &str) -> Option<String> {
    parse_period_date(raw)
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("20230630", 2023, 6, 30)]
    #[case("2023-06-30", 2023, 6, 30)]
    #[case("  20241231\n", 2024, 12, 31)]
    #[case("2000-02-29", 2000, 2, 29)]
    fn test_parse_accepted_forms(
        #[case] raw: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date = parse_period_date(raw).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(year, month, day).unwrap());
    }

    #[rstest]
    #[case("2023/06/30")]
    #[case("abcdefgh")]
    #[case("06-30-2023")]
    #[case("2023-6-30")]
    #[case("202306301")]
    #[case("2023-06-30 00:00:00")]
    #[case("２０２３０６３０")]
    fn test_parse_rejects_other_shapes(#[case] raw: &str) {
        assert!(matches!(
            parse_period_date(raw),
            Err(PeriodError::UnrecognizedFormat(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_period_date(""), Err(PeriodError::Empty));
        assert_eq!(parse_period_date("   "), Err(PeriodError::Empty));
    }

    #[rstest]
    #[case("20230231")]
    #[case("2023-13-01")]
    #[case("20230000")]
    #[case("2023-02-29")]
    fn test_parse_invalid_calendar_date(#[case] raw: &str) {
        assert!(matches!(
            parse_period_date(raw),
            Err(PeriodError::InvalidDate(_))
        ));
    }

    #[rstest]
    #[case(1, 2022)]
    #[case(6, 2022)]
    #[case(7, 2022)]
    #[case(8, 2023)]
    #[case(12, 2023)]
    fn test_fiscal_year_for_month_boundary(#[case] month: u32, #[case] expected: i32) {
        assert_eq!(fiscal_year_for(2023, month), expected);
    }

    #[test]
    fn test_format_equivalence() {
        assert_eq!(represented_fiscal_year("20230630"), Some(2022));
        assert_eq!(represented_fiscal_year("2023-06-30"), Some(2022));
        assert_eq!(represented_fiscal_year("2023/06/30"), None);
    }

    #[test]
    fn test_july_last_day_is_previous_year() {
        assert_eq!(represented_fiscal_year("2024-07-31"), Some(2023));
        assert_eq!(represented_fiscal_year("2024-08-01"), Some(2024));
    }

    #[test]
    fn test_normalize_report_date() {
        assert_eq!(
            normalize_report_date("20231103").as_deref(),
            Some("2023-11-03")
        );
        assert_eq!(
            normalize_report_date("2023-11-03").as_deref(),
            Some("2023-11-03")
        );
        assert_eq!(normalize_report_date("Nov 3, 2023"), None);
    }
}
