use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_request_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("request list output requires rows"))?;

    let filter = data.get("filter").and_then(Value::as_str).unwrap_or("all");
    let as_of = data.get("as_of").and_then(Value::as_str).unwrap_or("");

    if rows.is_empty() {
        return Ok([
            format!("No active requests match the `{filter}` filter (as of {as_of})."),
            String::new(),
            "Import payment requests first:".to_string(),
            "  1. duesly import create --help".to_string(),
            "  2. duesly import create --dry-run <path>".to_string(),
            "  3. duesly import create <path>".to_string(),
        ]
        .join("\n"));
    }

    let count_label = match rows.len() {
        1 => "1 request matches.".to_string(),
        n => format!("{n} requests match."),
    };

    let mut lines = vec![
        format!("Filter: {filter} (as of {as_of})"),
        count_label,
        String::new(),
    ];
    lines.extend(render_request_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_request_due(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("request due output requires rows"))?;

    let as_of = data.get("as_of").and_then(Value::as_str).unwrap_or("");
    let window_label = match data.get("within_days").and_then(Value::as_i64) {
        Some(days) => format!("due within {days} days of {as_of}"),
        None => format!("due by the end of the month (as of {as_of})"),
    };

    if rows.is_empty() {
        return Ok(format!("Nothing {window_label}."));
    }

    let count_label = match rows.len() {
        1 => format!("1 request {window_label}."),
        n => format!("{n} requests {window_label}."),
    };

    let mut lines = vec![count_label, String::new()];
    lines.extend(render_request_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_badge(data: &Value) -> io::Result<String> {
    let badge_count = data
        .get("badge_count")
        .and_then(Value::as_i64)
        .ok_or_else(|| io::Error::other("badge output requires badge_count"))?;
    let total = data
        .get("required_unpaid_total")
        .and_then(Value::as_i64)
        .unwrap_or(badge_count);
    let as_of = data.get("as_of").and_then(Value::as_str).unwrap_or("");

    let headline = match badge_count {
        0 => "Badge: 0 — nothing required is coming due.".to_string(),
        1 => "Badge: 1 required request is coming due.".to_string(),
        n => format!("Badge: {n} required requests are coming due."),
    };

    let entries = [
        ("As of date:", as_of.to_string()),
        ("Required unpaid (all):", total.to_string()),
    ];

    let mut lines = vec![headline, String::new()];
    lines.extend(format::key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

fn render_request_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Title",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
        Column {
            name: "Due",
            align: Align::Left,
        },
        Column {
            name: "State",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_cell(row, "title"),
                amount_cell(row),
                text_cell(row, "payment_type"),
                text_cell(row, "payment_status"),
                due_cell(row),
                state_cell(row),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &table_rows)
}

fn text_cell(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn amount_cell(row: &Value) -> String {
    let amount = row.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
    let currency = row.get("currency").and_then(Value::as_str).unwrap_or("");
    format!("{amount:.2} {currency}")
}

fn due_cell(row: &Value) -> String {
    row.get("due_date")
        .and_then(Value::as_str)
        .unwrap_or("-")
        .to_string()
}

fn state_cell(row: &Value) -> String {
    let flag = |key: &str| row.get(key).and_then(Value::as_bool).unwrap_or(false);
    if flag("due_today") {
        "due today".to_string()
    } else if flag("overdue") {
        "overdue".to_string()
    } else if flag("upcoming") {
        "upcoming".to_string()
    } else {
        "no due date".to_string()
    }
}
