use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::commands::{load_setup, resolve_as_of};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{DueWindowData, RequestListData, RequestRow};
use crate::triage::classify::{is_due_this_month, is_due_today, is_due_within_days, is_overdue, is_upcoming};
use crate::triage::date::format_iso_date;
use crate::triage::filter::{DueFilter, apply_filter};
use crate::triage::query::load_requests;
use crate::triage::types::PaymentRequest;
use crate::{ClientError, ClientResult};

pub const DEFAULT_DUE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Default)]
pub struct ListOptions<'a> {
    pub filter: Option<String>,
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct DueOptions<'a> {
    pub within: Option<i64>,
    pub this_month: bool,
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn list(filter: Option<String>, as_of: Option<String>) -> ClientResult<SuccessEnvelope> {
    list_with_options(ListOptions {
        filter,
        as_of,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let today = resolve_as_of(options.as_of.as_deref())?;

    let filter = options
        .filter
        .as_deref()
        .map(DueFilter::parse)
        .unwrap_or(DueFilter::All);

    let db_path = PathBuf::from(&setup.db_path);
    let requests = load_requests(&db_path)?;
    let total_active = requests.iter().filter(|request| !request.is_paid()).count() as i64;

    let filtered = apply_filter(&requests, filter, today);
    let rows = filtered
        .iter()
        .map(|request| request_row(request, today))
        .collect::<Vec<RequestRow>>();

    success(
        "request list",
        RequestListData {
            filter: filter.as_str().to_string(),
            as_of: format_iso_date(&today),
            total_active,
            returned: rows.len() as i64,
            rows,
            data_range: setup.data_range,
        },
    )
}

pub fn due(
    within: Option<i64>,
    this_month: bool,
    as_of: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    due_with_options(DueOptions {
        within,
        this_month,
        as_of,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn due_with_options(options: DueOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.this_month && options.within.is_some() {
        return Err(ClientError::invalid_argument_for_command(
            "--within and --this-month are mutually exclusive. Pick one window.",
            Some("request due"),
        ));
    }

    let setup = load_setup(options.home_override)?;
    let today = resolve_as_of(options.as_of.as_deref())?;

    let db_path = PathBuf::from(&setup.db_path);
    let requests = load_requests(&db_path)?;

    let (window, within_days): (&str, Option<i64>) = if options.this_month {
        ("this_month", None)
    } else {
        (
            "within_days",
            Some(options.within.unwrap_or(DEFAULT_DUE_WINDOW_DAYS)),
        )
    };

    let rows = requests
        .iter()
        .filter(|request| !request.is_paid())
        .filter(|request| {
            let due = request.due_date.as_deref();
            match within_days {
                Some(days) => is_due_within_days(due, days, today),
                None => is_due_this_month(due, today),
            }
        })
        .map(|request| request_row(request, today))
        .collect::<Vec<RequestRow>>();

    success(
        "request due",
        DueWindowData {
            window: window.to_string(),
            as_of: format_iso_date(&today),
            within_days,
            returned: rows.len() as i64,
            rows,
        },
    )
}

fn request_row(request: &PaymentRequest, today: NaiveDate) -> RequestRow {
    let due = request.due_date.as_deref();
    RequestRow {
        request_id: request.request_id.clone(),
        title: request.title.clone(),
        amount: request.amount,
        currency: request.currency.clone(),
        payment_type: request.payment_type.as_str().to_string(),
        payment_status: request.payment_status.as_str().to_string(),
        due_date: request.due_date.clone(),
        member: request.member.clone(),
        due_today: is_due_today(due, today),
        overdue: is_overdue(due, today),
        upcoming: is_upcoming(due, today),
    }
}
