//! Date parsing and formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown in place of a missing date.
pub const NO_DATE: &str = "No date";

/// Timestamps with an explicit offset other than RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

/// Parses the calendar date of an obligation.
///
/// Partial dates follow the usual reading: `2024-03` is March 1 and `2024`
/// is January 1.
///
/// Timestamps keep the date as written in their own offset, so
/// `2024-03-15T23:30:00-08:00` is March 15 regardless of the host zone.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.date_naive());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.date_naive())
        .or_else(|| parse_partial_date(s))
}

/// `YYYY-MM` or `YYYY`, read as the first day of the month or year.
fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.split_once('-').unwrap_or((s, "01"));
    let is_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_digits(year, 4) || !is_digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Long `en-US` form, e.g. `March 15, 2024`.
///
/// Tries the raw text, then the part before the first `T`, then gives the
/// raw text back unchanged.
#[must_use]
pub fn format_display_date(raw: &str) -> String {
    if raw.is_empty() {
        return NO_DATE.to_string();
    }

    let date = parse_date(raw).or_else(|| {
        raw.split_once('T')
            .and_then(|(date_part, _)| parse_date(date_part))
    });

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Sortable `YYYY-MM-DD` form; the raw text when it does not parse.
#[must_use]
pub fn format_csv_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-03-15", Some((2024, 3, 15)))]
    #[case("2024-03-15T08:00:00Z", Some((2024, 3, 15)))]
    #[case("2024-03-15T08:00:00.000Z", Some((2024, 3, 15)))]
    #[case("2024-03-15T23:30:00-08:00", Some((2024, 3, 15)))]
    #[case("2024-03-15T08:00:00+0800", Some((2024, 3, 15)))]
    #[case("2024-03-15T08:00:00", Some((2024, 3, 15)))]
    #[case("2024-03-15T08:00", Some((2024, 3, 15)))]
    #[case("2024-03-15 08:00:00", Some((2024, 3, 15)))]
    #[case("2024/03/15", Some((2024, 3, 15)))]
    #[case("03/15/2024", Some((2024, 3, 15)))]
    #[case("March 15, 2024", Some((2024, 3, 15)))]
    #[case("Mar 5, 2024", Some((2024, 3, 5)))]
    #[case("15 March 2024", Some((2024, 3, 15)))]
    #[case("Fri, 15 Mar 2024 08:00:00 +0000", Some((2024, 3, 15)))]
    #[case("  2024-03-15  ", Some((2024, 3, 15)))]
    #[case("2024-03", Some((2024, 3, 1)))]
    #[case("2024", Some((2024, 1, 1)))]
    #[case("2024-13", None)]
    #[case("2024-3", None)]
    #[case("24", None)]
    #[case("2024-02-30", None)]
    #[case("not-a-date", None)]
    #[case("", None)]
    fn test_parse_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(parse_date(raw), expected);
    }

    #[rstest]
    #[case("2024-03-15T08:00:00Z", "March 15, 2024")]
    #[case("2024-01-05", "January 5, 2024")]
    #[case("2024-03", "March 1, 2024")]
    #[case("2024", "January 1, 2024")]
    #[case("2024-03-15Tgarbage", "March 15, 2024")]
    #[case("not-a-date", "not-a-date")]
    #[case("2024-13-45", "2024-13-45")]
    #[case("Today", "Today")]
    #[case("", "No date")]
    fn test_format_display_date(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_display_date(raw), expected);
    }

    #[rstest]
    #[case("2024-03-15T08:00:00Z", "2024-03-15")]
    #[case("March 3, 2024", "2024-03-03")]
    #[case("2024-03", "2024-03-01")]
    #[case("2024", "2024-01-01")]
    #[case("2024-03-15Tgarbage", "2024-03-15Tgarbage")]
    #[case("not-a-date", "not-a-date")]
    #[case("", "")]
    fn test_format_csv_date(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_csv_date(raw), expected);
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("2024-13-45")]
    #[case("   ")]
    #[case("31/31/31")]
    fn test_both_forms_fall_back_to_raw(#[case] raw: &str) {
        assert_eq!(format_display_date(raw), raw);
        assert_eq!(format_csv_date(raw), raw);
    }
}
