use std::io;

use duesly_client::contracts::envelope::failure_from_error;
use duesly_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "request list" | "request due" | "badge" | "import" | "import undo" => {
            envelope_json(&success.data)
        }
        "import list" => render_import_list_json(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn envelope_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

// Import list is emitted as a bare array so shell pipelines can index it
// directly, newest first.
fn render_import_list_json(data: &Value) -> Value {
    let mut rows = data
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    rows.sort_by(|left, right| {
        let left_created = parse_created_at(left);
        let right_created = parse_created_at(right);
        right_created
            .cmp(&left_created)
            .then_with(|| value_string(right, "import_id").cmp(&value_string(left, "import_id")))
    });

    Value::Array(rows)
}

fn parse_created_at(row: &Value) -> i64 {
    if let Some(raw) = row.get("created_at") {
        if let Some(value) = raw.as_i64() {
            return value;
        }
        if let Some(text) = raw.as_str() {
            return text.parse::<i64>().unwrap_or(0);
        }
    }
    0
}

fn value_string(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use duesly_client::SuccessEnvelope;
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn request_list_json_uses_structured_envelope() {
        let payload = success(
            "request list",
            json!({
                "filter": "required",
                "as_of": "2026-03-15",
                "rows": []
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(
                    value["data"]["filter"],
                    Value::String("required".to_string())
                );
            }
        }
    }

    #[test]
    fn import_list_json_returns_raw_array_newest_first() {
        let payload = success(
            "import list",
            json!({
                "rows": [
                    {"import_id": "imp_1", "created_at": "1", "status": "committed"},
                    {"import_id": "imp_2", "created_at": "2", "status": "committed"}
                ]
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert!(value.is_array());
                assert_eq!(value[0]["import_id"], Value::String("imp_2".to_string()));
            }
        }
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = duesly_client::ClientError::new(
            "import_id_not_found",
            "missing",
            vec!["run duesly import list".to_string()],
        );
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("import_id_not_found".to_string())
                );
                assert!(value.get("ok").is_none());
            }
        }
    }
}
