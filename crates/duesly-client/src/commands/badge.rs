use std::path::{Path, PathBuf};

use crate::commands::{load_setup, resolve_as_of};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::BadgeData;
use crate::triage::date::format_iso_date;
use crate::triage::filter::count_required_unpaid;
use crate::triage::query::load_requests;
use crate::ClientResult;

#[derive(Debug, Default)]
pub struct BadgeOptions<'a> {
    pub as_of: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(as_of: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(BadgeOptions {
        as_of,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BadgeOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let today = resolve_as_of(options.as_of.as_deref())?;

    let db_path = PathBuf::from(&setup.db_path);
    let requests = load_requests(&db_path)?;

    // Badge gates on the due date; the raw total does not, so callers can
    // see how many required requests have no usable due date yet.
    let required_unpaid_total = requests
        .iter()
        .filter(|request| request.is_required())
        .filter(|request| !request.is_paid())
        .count() as i64;

    success(
        "badge",
        BadgeData {
            as_of: format_iso_date(&today),
            badge_count: count_required_unpaid(&requests, today),
            required_unpaid_total,
        },
    )
}
