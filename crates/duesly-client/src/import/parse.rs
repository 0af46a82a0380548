use std::collections::HashMap;

use serde_json::Value;

use crate::import::invalid_input_error;
use crate::{ClientError, ClientResult};

pub(crate) const REQUIRED_IMPORT_FIELDS: [&str; 5] = [
    "title",
    "amount",
    "currency",
    "payment_type",
    "payment_status",
];

pub(crate) const OPTIONAL_IMPORT_FIELDS: [&str; 3] = ["due_date", "member", "external_id"];

#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) title: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) currency: Option<String>,
    pub(crate) payment_type: Option<String>,
    pub(crate) payment_status: Option<String>,
    pub(crate) due_date: Option<String>,
    pub(crate) member: Option<String>,
    pub(crate) external_id: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Import source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_import_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_import_format(
            "JSON input must be a top-level array of payment request objects.",
            "json_non_array",
        ));
    }

    Err(ClientError::invalid_import_format(
        "Unsupported import format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of payment request objects.",
        ));
    };

    let mut rows = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with payment request fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            title: read_optional_string(object.get("title")),
            amount: read_optional_string(object.get("amount")),
            currency: read_optional_string(object.get("currency")),
            payment_type: read_optional_string(object.get("payment_type")),
            payment_status: read_optional_string(object.get("payment_status")),
            due_date: read_optional_string(object.get("due_date")),
            member: read_optional_string(object.get("member")),
            external_id: read_optional_string(object.get("external_id")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::import_schema_mismatch(
            REQUIRED_IMPORT_FIELDS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            OPTIONAL_IMPORT_FIELDS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            title: value_for(&record, &index_by_name, "title"),
            amount: value_for(&record, &index_by_name, "amount"),
            currency: value_for(&record, &index_by_name, "currency"),
            payment_type: value_for(&record, &index_by_name, "payment_type"),
            payment_status: value_for(&record, &index_by_name, "payment_status"),
            due_date: value_for(&record, &index_by_name, "due_date"),
            member: value_for(&record, &index_by_name, "member"),
            external_id: value_for(&record, &index_by_name, "external_id"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    if let Some(number_value) = current.as_f64() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    for required in REQUIRED_IMPORT_FIELDS {
        if !actual_headers.iter().any(|value| value == required) {
            return false;
        }
    }

    for header in actual_headers {
        let allowed = REQUIRED_IMPORT_FIELDS
            .iter()
            .any(|value| value == &header.as_str())
            || OPTIONAL_IMPORT_FIELDS
                .iter()
                .any(|value| value == &header.as_str());
        if !allowed {
            return false;
        }
    }

    true
}
