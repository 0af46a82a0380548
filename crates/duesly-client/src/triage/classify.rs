use chrono::{Duration, NaiveDate};

use crate::triage::date::{last_day_of_month, normalize_due_date};

/// Due-date classification over nullable, possibly-garbage input.
///
/// Every predicate takes `today` explicitly so callers own the clock; the
/// command layer passes a fresh `date::today_utc()` (or an `--as-of`
/// override) per invocation. A due date that fails normalization satisfies
/// no predicate.

pub fn is_due_today(due: Option<&str>, today: NaiveDate) -> bool {
    match normalize_due_date(due) {
        Some(date) => date == today,
        None => false,
    }
}

/// Strictly before today. A request due today is not overdue.
pub fn is_overdue(due: Option<&str>, today: NaiveDate) -> bool {
    match normalize_due_date(due) {
        Some(date) => date < today,
        None => false,
    }
}

/// Today or later. Complementary to `is_overdue` over normalizable input.
pub fn is_upcoming(due: Option<&str>, today: NaiveDate) -> bool {
    match normalize_due_date(due) {
        Some(date) => date >= today,
        None => false,
    }
}

/// Inclusive window `today ..= today + days`.
///
/// Negative `days` inverts the bounds, which makes the window empty; that is
/// the contract for caller-supplied negatives, not a panic. Windows too wide
/// for the calendar clamp to the last representable date, so any `i64` is a
/// usable window size.
pub fn is_due_within_days(due: Option<&str>, days: i64, today: NaiveDate) -> bool {
    if days < 0 {
        return false;
    }
    let Some(date) = normalize_due_date(due) else {
        return false;
    };
    let upper = Duration::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or(NaiveDate::MAX);
    date >= today && date <= upper
}

/// Inclusive window `today ..= last day of today's month`.
///
/// The window tracks the real current month, not the due date's month: a due
/// date in next month is excluded even when it is fewer than 31 days away,
/// and a January due date checked in December is not-this-month.
pub fn is_due_this_month(due: Option<&str>, today: NaiveDate) -> bool {
    let Some(date) = normalize_due_date(due) else {
        return false;
    };
    date >= today && date <= last_day_of_month(today)
}
