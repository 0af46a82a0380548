use chrono::NaiveDate;

use crate::triage::classify::is_upcoming;
use crate::triage::types::PaymentRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Required,
    Upcoming,
    All,
}

impl DueFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Upcoming => "upcoming",
            Self::All => "all",
        }
    }

    /// Total: unrecognized selectors fall back to `All`, the pipeline's
    /// default branch. The CLI restricts the flag to the known names, so
    /// this leniency is only reachable through the library API.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => Self::Required,
            "upcoming" => Self::Upcoming,
            _ => Self::All,
        }
    }
}

/// Applies a named filter to a request list.
///
/// Paid requests are dropped first, regardless of filter. The surviving
/// rows keep their input order; nothing here re-sorts.
pub fn apply_filter(
    requests: &[PaymentRequest],
    filter: DueFilter,
    today: NaiveDate,
) -> Vec<PaymentRequest> {
    let active = requests.iter().filter(|request| !request.is_paid());

    match filter {
        DueFilter::Required => active
            .filter(|request| request.is_required())
            .cloned()
            .collect(),
        DueFilter::Upcoming => active
            .filter(|request| is_upcoming(request.due_date.as_deref(), today))
            .cloned()
            .collect(),
        DueFilter::All => active.cloned().collect(),
    }
}

/// Badge count: required, not paid, and due today or later.
///
/// Deliberately independent of `apply_filter`; reminder surfaces call this
/// on its own.
pub fn count_required_unpaid(requests: &[PaymentRequest], today: NaiveDate) -> i64 {
    requests
        .iter()
        .filter(|request| request.is_required())
        .filter(|request| !request.is_paid())
        .filter(|request| is_upcoming(request.due_date.as_deref(), today))
        .count() as i64
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DueFilter, apply_filter, count_required_unpaid};
    use crate::triage::types::{PaymentRequest, PaymentStatus, PaymentType};

    fn day(value: &str) -> NaiveDate {
        let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d");
        assert!(parsed.is_ok(), "bad test date: {value}");
        parsed.unwrap_or_default()
    }

    fn request(
        id: &str,
        payment_type: PaymentType,
        payment_status: PaymentStatus,
        due_date: Option<&str>,
    ) -> PaymentRequest {
        PaymentRequest {
            request_id: id.to_string(),
            title: format!("request {id}"),
            amount: 25.0,
            currency: "USD".to_string(),
            payment_type,
            payment_status,
            due_date: due_date.map(std::string::ToString::to_string),
            member: None,
        }
    }

    fn ids(rows: &[PaymentRequest]) -> Vec<&str> {
        rows.iter().map(|row| row.request_id.as_str()).collect()
    }

    #[test]
    fn spec_scenario_required_upcoming_and_badge() {
        // Three requests: required/unpaid due today, optional/unpaid due
        // tomorrow, required/paid due yesterday.
        let today = day("2026-03-15");
        let requests = vec![
            request(
                "req_1",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-15"),
            ),
            request(
                "req_2",
                PaymentType::Optional,
                PaymentStatus::Unpaid,
                Some("2026-03-16"),
            ),
            request(
                "req_3",
                PaymentType::Required,
                PaymentStatus::Paid,
                Some("2026-03-14"),
            ),
        ];

        assert_eq!(
            ids(&apply_filter(&requests, DueFilter::Required, today)),
            vec!["req_1"]
        );
        assert_eq!(
            ids(&apply_filter(&requests, DueFilter::Upcoming, today)),
            vec!["req_1", "req_2"]
        );
        assert_eq!(count_required_unpaid(&requests, today), 1);
    }

    #[test]
    fn paid_rows_never_survive_any_filter() {
        let today = day("2026-03-15");
        let requests = vec![
            request(
                "req_1",
                PaymentType::Required,
                PaymentStatus::Paid,
                Some("2026-03-20"),
            ),
            request(
                "req_2",
                PaymentType::Optional,
                PaymentStatus::Paid,
                Some("2026-03-20"),
            ),
        ];

        for filter in [DueFilter::Required, DueFilter::Upcoming, DueFilter::All] {
            let filtered = apply_filter(&requests, filter, today);
            assert!(filtered.iter().all(|row| !row.is_paid()));
            assert!(filtered.len() <= requests.len());
        }
        assert!(apply_filter(&requests, DueFilter::All, today).is_empty());
    }

    #[test]
    fn required_result_is_a_subset_of_all() {
        let today = day("2026-03-15");
        let requests = vec![
            request("req_1", PaymentType::Required, PaymentStatus::Unpaid, None),
            request(
                "req_2",
                PaymentType::Optional,
                PaymentStatus::Pending,
                Some("2026-03-10"),
            ),
            request(
                "req_3",
                PaymentType::Required,
                PaymentStatus::Paid,
                Some("2026-03-16"),
            ),
        ];

        let all = apply_filter(&requests, DueFilter::All, today);
        let required = apply_filter(&requests, DueFilter::Required, today);
        let all_ids = ids(&all);
        assert!(required.iter().all(|row| all_ids.contains(&row.request_id.as_str())));
    }

    #[test]
    fn null_due_dates_fail_date_gates_but_pass_type_gates() {
        let today = day("2026-03-15");
        let requests = vec![request(
            "req_1",
            PaymentType::Required,
            PaymentStatus::Unpaid,
            None,
        )];

        assert!(apply_filter(&requests, DueFilter::Upcoming, today).is_empty());
        assert_eq!(count_required_unpaid(&requests, today), 0);
        assert_eq!(
            ids(&apply_filter(&requests, DueFilter::Required, today)),
            vec!["req_1"]
        );
        assert_eq!(
            ids(&apply_filter(&requests, DueFilter::All, today)),
            vec!["req_1"]
        );
    }

    #[test]
    fn pending_counts_as_unpaid_for_the_badge() {
        let today = day("2026-03-15");
        let requests = vec![request(
            "req_1",
            PaymentType::Required,
            PaymentStatus::Pending,
            Some("2026-03-18"),
        )];
        assert_eq!(count_required_unpaid(&requests, today), 1);
    }

    #[test]
    fn badge_count_never_exceeds_input_length() {
        let today = day("2026-03-15");
        let requests = vec![
            request(
                "req_1",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-15"),
            ),
            request(
                "req_2",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-16"),
            ),
        ];
        assert!(count_required_unpaid(&requests, today) <= requests.len() as i64);
    }

    #[test]
    fn filters_preserve_input_order() {
        let today = day("2026-03-15");
        let requests = vec![
            request(
                "req_c",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-20"),
            ),
            request(
                "req_a",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-16"),
            ),
            request(
                "req_b",
                PaymentType::Required,
                PaymentStatus::Unpaid,
                Some("2026-03-18"),
            ),
        ];

        assert_eq!(
            ids(&apply_filter(&requests, DueFilter::Upcoming, today)),
            vec!["req_c", "req_a", "req_b"]
        );
    }

    #[test]
    fn unrecognized_filter_names_fall_back_to_all() {
        assert_eq!(DueFilter::parse("required"), DueFilter::Required);
        assert_eq!(DueFilter::parse("UPCOMING"), DueFilter::Upcoming);
        assert_eq!(DueFilter::parse("all"), DueFilter::All);
        assert_eq!(DueFilter::parse("overdue"), DueFilter::All);
        assert_eq!(DueFilter::parse(""), DueFilter::All);
    }
}
