use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_import_run(data: &Value) -> io::Result<String> {
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let summary = data
        .get("summary")
        .and_then(Value::as_object)
        .ok_or_else(|| io::Error::other("import output requires summary"))?;

    let mut lines = Vec::new();
    if dry_run {
        lines.push("Dry-run validation completed successfully.".to_string());
    } else {
        lines.push("Import completed successfully.".to_string());
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());

    let mut entries = Vec::new();
    if !dry_run {
        let import_id = data
            .get("import_id")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        entries.push(("Import ID:", import_id.to_string()));
    }

    entries.push(("Rows read:", get_i64(summary, "rows_read").to_string()));
    entries.push(("Rows valid:", get_i64(summary, "rows_valid").to_string()));
    entries.push((
        "Rows invalid:",
        get_i64(summary, "rows_invalid").to_string(),
    ));
    entries.push(("Inserted:", get_i64(summary, "inserted").to_string()));

    lines.extend(format::key_value_rows(&entries, 2));

    if dry_run {
        lines.push(String::new());
        lines.push("No rows were written because this was a dry run.".to_string());
    }

    lines.push(String::new());
    lines.extend(render_next_step(data));

    Ok(lines.join("\n"))
}

pub fn render_import_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("import list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No imports found yet.",
            "",
            "Run your first import:",
            "  1. duesly import create --help",
            "  2. duesly import create --dry-run <path>",
            "  3. duesly import create <path>",
        ]
        .join("\n"));
    }

    let count_label = if rows.len() == 1 {
        "1 import found.".to_string()
    } else {
        format!("{} imports found.", rows.len())
    };

    let columns = [
        Column {
            name: "Import ID",
            align: Align::Left,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
        Column {
            name: "Inserted",
            align: Align::Right,
        },
        Column {
            name: "Source",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                string_field(row, "import_id"),
                string_field(row, "status"),
                row.get("inserted")
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
                    .to_string(),
                source_field(row),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![count_label, String::new()];
    lines.extend(format::render_table(&columns, &table_rows));
    lines.push(String::new());
    lines.push("Undo an import:".to_string());
    lines.push("  duesly import undo <import-id>".to_string());

    Ok(lines.join("\n"))
}

pub fn render_import_undo(data: &Value) -> io::Result<String> {
    let import_id = data
        .get("import_id")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("import undo output requires import_id"))?;
    let rows_reverted = data
        .get("rows_reverted")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    let entries = [
        ("Import ID:", import_id.to_string()),
        ("Rows reverted:", rows_reverted.to_string()),
    ];

    let mut lines = vec!["Import reverted successfully.".to_string(), String::new()];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push("Check what remains:".to_string());
    lines.push("  duesly request list".to_string());

    Ok(lines.join("\n"))
}

fn render_next_step(data: &Value) -> Vec<String> {
    let Some(next_step) = data.get("next_step").and_then(Value::as_object) else {
        return Vec::new();
    };

    let label = next_step
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("Next step");
    let command = next_step
        .get("command")
        .and_then(Value::as_str)
        .unwrap_or("");

    vec![format!("{label}:"), format!("  {command}")]
}

fn get_i64(map: &serde_json::Map<String, Value>, key: &str) -> i64 {
    map.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn string_field(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn source_field(row: &Value) -> String {
    let kind = string_field(row, "source_kind");
    let reference = string_field(row, "source_ref");
    if reference.is_empty() {
        kind
    } else {
        format!("{kind} ({reference})")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_import_list, render_import_run, render_import_undo};

    #[test]
    fn committed_import_shows_id_and_next_step() {
        let data = json!({
            "dry_run": false,
            "import_id": "imp_abc",
            "message": "Import completed successfully.",
            "summary": {"rows_read": 2, "rows_valid": 2, "rows_invalid": 0, "inserted": 2},
            "next_step": {
                "label": "Review what is due",
                "command": "duesly request list --filter upcoming"
            }
        });

        let rendered = render_import_run(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Import completed successfully."));
            assert!(text.contains("Import ID:"));
            assert!(text.contains("imp_abc"));
            assert!(text.contains("duesly request list --filter upcoming"));
        }
    }

    #[test]
    fn dry_run_omits_import_id_and_flags_no_writes() {
        let data = json!({
            "dry_run": true,
            "summary": {"rows_read": 2, "rows_valid": 2, "rows_invalid": 0, "inserted": 0},
            "next_step": {
                "label": "Commit this import",
                "command": "duesly import create <path>"
            }
        });

        let rendered = render_import_run(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Dry-run validation completed successfully."));
            assert!(!text.contains("Import ID:"));
            assert!(text.contains("No rows were written because this was a dry run."));
        }
    }

    #[test]
    fn import_list_renders_table_and_undo_hint() {
        let data = json!({
            "rows": [
                {
                    "import_id": "imp_1",
                    "status": "committed",
                    "created_at": "1",
                    "rows_read": 2,
                    "rows_valid": 2,
                    "rows_invalid": 0,
                    "inserted": 2,
                    "source_kind": "file",
                    "source_ref": "requests.json"
                }
            ]
        });

        let rendered = render_import_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("1 import found."));
            assert!(text.contains("imp_1"));
            assert!(text.contains("file (requests.json)"));
            assert!(text.contains("duesly import undo <import-id>"));
        }
    }

    #[test]
    fn undo_output_names_the_reverted_import() {
        let data = json!({
            "import_id": "imp_1",
            "message": "Import reverted successfully.",
            "rows_reverted": 2
        });

        let rendered = render_import_undo(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Import reverted successfully."));
            assert!(text.contains("Rows reverted:"));
        }
    }
}
