use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Normalizes a nullable date-like string to a UTC calendar day.
///
/// Accepted shapes:
/// - `YYYY-MM-DD`
/// - RFC 3339 datetimes with any offset (converted to the UTC calendar day)
/// - `YYYY-MM-DDTHH:MM:SS[.fff]` without an offset (read as UTC)
///
/// Anything else, including `None` and empty strings, normalizes to `None`.
/// Parse failures are absorbed here so every classifier stays total.
pub fn normalize_due_date(value: Option<&str>) -> Option<NaiveDate> {
    let raw = value?.trim();
    if raw.is_empty() {
        return None;
    }

    if looks_like_iso_date(raw) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc).date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.date());
        }
    }

    None
}

/// The current instant's UTC calendar day, re-read on every call.
///
/// Never cache the result across calls: a long-running process that holds a
/// "today" value across a day boundary misclassifies everything after
/// midnight.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let day = days_in_month(date.year(), date.month());
    NaiveDate::from_ymd_opt(date.year(), date.month(), day).unwrap_or(date)
}

pub(crate) fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{format_iso_date, last_day_of_month, normalize_due_date, parse_iso_date};

    fn date(value: &str) -> Option<NaiveDate> {
        parse_iso_date(value)
    }

    #[test]
    fn plain_iso_dates_normalize_to_themselves() {
        assert_eq!(normalize_due_date(Some("2026-03-15")), date("2026-03-15"));
    }

    #[test]
    fn missing_and_empty_inputs_normalize_to_none() {
        assert_eq!(normalize_due_date(None), None);
        assert_eq!(normalize_due_date(Some("")), None);
        assert_eq!(normalize_due_date(Some("   ")), None);
    }

    #[test]
    fn unparseable_inputs_normalize_to_none_without_error() {
        for garbage in ["next tuesday", "2026-13-01", "2026-02-30", "15/03/2026"] {
            assert_eq!(normalize_due_date(Some(garbage)), None, "input: {garbage}");
        }
    }

    #[test]
    fn rfc3339_offsets_collapse_to_the_utc_calendar_day() {
        // 23:30 at -02:00 is 01:30 UTC the next day.
        assert_eq!(
            normalize_due_date(Some("2026-03-15T23:30:00-02:00")),
            date("2026-03-16")
        );
        assert_eq!(
            normalize_due_date(Some("2026-03-15T00:10:00Z")),
            date("2026-03-15")
        );
    }

    #[test]
    fn same_utc_day_timestamps_normalize_to_equal_values() {
        let morning = normalize_due_date(Some("2026-03-15T01:00:00Z"));
        let night = normalize_due_date(Some("2026-03-15T23:59:59Z"));
        assert!(morning.is_some());
        assert_eq!(morning, night);
    }

    #[test]
    fn offsetless_datetimes_are_read_as_utc() {
        assert_eq!(
            normalize_due_date(Some("2026-03-15T18:30:00")),
            date("2026-03-15")
        );
        assert_eq!(
            normalize_due_date(Some("2026-03-15 18:30:00")),
            date("2026-03-15")
        );
    }

    #[test]
    fn normalize_is_idempotent_by_value() {
        let first = normalize_due_date(Some("2026-03-15T23:30:00-02:00"));
        let second = normalize_due_date(Some("2026-03-15T23:30:00-02:00"));
        assert_eq!(first, second);
    }

    #[test]
    fn last_day_of_month_handles_february_and_leap_years() {
        let feb_2026 = date("2026-02-10");
        assert!(feb_2026.is_some());
        if let Some(value) = feb_2026 {
            assert_eq!(format_iso_date(&last_day_of_month(value)), "2026-02-28");
        }

        let feb_2028 = date("2028-02-01");
        assert!(feb_2028.is_some());
        if let Some(value) = feb_2028 {
            assert_eq!(format_iso_date(&last_day_of_month(value)), "2028-02-29");
        }
    }

    #[test]
    fn last_day_of_month_handles_december() {
        let dec = date("2026-12-31");
        assert!(dec.is_some());
        if let Some(value) = dec {
            assert_eq!(format_iso_date(&last_day_of_month(value)), "2026-12-31");
        }
    }
}
