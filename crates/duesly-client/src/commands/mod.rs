pub mod badge;
pub mod import;
pub mod requests;

use std::path::Path;

use chrono::NaiveDate;

use crate::setup::{SetupContext, ensure_initialized, ensure_initialized_at};
use crate::triage::date::{parse_iso_date, today_utc};
use crate::{ClientError, ClientResult};

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    if let Some(path) = home_override {
        return ensure_initialized_at(path);
    }
    ensure_initialized()
}

// The clock is resolved exactly once per command invocation; everything
// downstream receives this date instead of reading the clock again.
pub(crate) fn resolve_as_of(as_of: Option<&str>) -> ClientResult<NaiveDate> {
    let Some(value) = as_of else {
        return Ok(today_utc());
    };

    parse_iso_date(value).ok_or_else(|| {
        ClientError::invalid_argument(&format!(
            "Invalid --as-of value `{value}`. Expected a calendar date in YYYY-MM-DD form."
        ))
    })
}
