use std::fs;
use std::path::{Path, PathBuf};

use duesly_client::commands::badge::{self, BadgeOptions};
use duesly_client::commands::import::{self, ImportRunOptions};
use duesly_client::commands::requests::{self, DueOptions, ListOptions};
use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn import_rows(home: &Path, rows: &[Value]) {
    let temp_dir = Builder::new()
        .prefix("duesly-triage-fixture")
        .tempdir_in("/tmp");
    assert!(temp_dir.is_ok());
    if let Ok(dir) = temp_dir {
        let fixture = write_fixture_json(dir.path(), "rows.json", rows);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let result = import::run_with_options(ImportRunOptions {
                path: Some(path.display().to_string()),
                dry_run: false,
                home_override: Some(home),
                stdin_override: None,
            });
            assert!(result.is_ok());
        }
    }
}

pub fn list_payload(home: &Path, filter: Option<&str>, as_of: Option<&str>) -> Value {
    let result = requests::list_with_options(ListOptions {
        filter: filter.map(std::string::ToString::to_string),
        as_of: as_of.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    envelope_to_value(result)
}

pub fn due_payload(
    home: &Path,
    within: Option<i64>,
    this_month: bool,
    as_of: Option<&str>,
) -> Value {
    let result = requests::due_with_options(DueOptions {
        within,
        this_month,
        as_of: as_of.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    envelope_to_value(result)
}

pub fn badge_payload(home: &Path, as_of: Option<&str>) -> Value {
    let result = badge::run_with_options(BadgeOptions {
        as_of: as_of.map(std::string::ToString::to_string),
        home_override: Some(home),
    });
    envelope_to_value(result)
}

pub fn row_titles(payload: &Value) -> Vec<String> {
    payload["data"]["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row.get("title").and_then(Value::as_str))
                .map(std::string::ToString::to_string)
                .collect::<Vec<String>>()
        })
        .unwrap_or_default()
}

pub fn request(
    title: &str,
    payment_type: &str,
    payment_status: &str,
    due_date: Option<&str>,
) -> Value {
    let mut row = json!({
        "title": title,
        "amount": 25.0,
        "currency": "USD",
        "payment_type": payment_type,
        "payment_status": payment_status,
    });
    if let Some(due) = due_date {
        row["due_date"] = Value::String(due.to_string());
    }
    row
}

fn envelope_to_value(
    result: duesly_client::ClientResult<duesly_client::SuccessEnvelope>,
) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let payload = serde_json::to_value(success);
        assert!(payload.is_ok());
        if let Ok(value) = payload {
            return value;
        }
    }
    Value::Null
}

fn write_fixture_json(dir: &Path, name: &str, rows: &[Value]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let body = serde_json::to_string(&Value::Array(rows.to_vec()))
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    fs::write(&path, body)?;
    Ok(path)
}
