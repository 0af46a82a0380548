use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::import::CanonicalRequest;
use crate::import::parse::ParsedRow;
use crate::triage::date::looks_like_iso_date;
use crate::triage::types::{PaymentStatus, PaymentType};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows {
    pub(crate) rows: Vec<CanonicalRequest>,
    pub(crate) summary: ImportSummary,
}

pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedRows> {
    let total_rows = parsed_rows.len();
    let mut rows = Vec::new();
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let title = validate_required_string(
            raw.row,
            "title",
            raw.title,
            &mut row_issues,
            "title must be present and non-empty.",
        );
        let amount = validate_amount(raw.row, raw.amount, &mut row_issues);
        let currency = validate_currency(raw.row, raw.currency, &mut row_issues);
        let payment_type = validate_payment_type(raw.row, raw.payment_type, &mut row_issues);
        let payment_status = validate_payment_status(raw.row, raw.payment_status, &mut row_issues);
        let due_date = validate_due_date(raw.row, raw.due_date, &mut row_issues);
        let member = normalize_optional(raw.member);
        let external_id = normalize_optional(raw.external_id);

        if row_issues.is_empty() {
            rows.push(CanonicalRequest {
                title: title.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
                currency: currency.unwrap_or_default(),
                payment_type: payment_type
                    .map(PaymentType::as_str)
                    .unwrap_or("optional")
                    .to_string(),
                payment_status: payment_status
                    .map(PaymentStatus::as_str)
                    .unwrap_or("unpaid")
                    .to_string(),
                due_date,
                member,
                external_id,
            });
        } else {
            issues.extend(row_issues);
        }
    }

    let summary = ImportSummary {
        rows_read: total_rows as i64,
        rows_valid: rows.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<std::collections::HashSet<i64>>()
            .len() as i64,
        inserted: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    Ok(ValidatedRows { rows, summary })
}

fn validate_required_string(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
    description: &str,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(ImportIssue {
            row,
            field: field.to_string(),
            code: "missing_required_field".to_string(),
            description: description.to_string(),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        });
    }
    normalized
}

fn validate_amount(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ImportIssue {
            row,
            field: "amount".to_string(),
            code: "missing_required_field".to_string(),
            description: "amount must be present and non-empty.".to_string(),
            expected: Some("number (e.g. 25.00)".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    match candidate.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => {
            issues.push(ImportIssue {
                row,
                field: "amount".to_string(),
                code: "invalid_number".to_string(),
                description: format!("amount must be numeric; got \"{candidate}\""),
                expected: Some("number (e.g. 25.00)".to_string()),
                received: Some(candidate),
            });
            None
        }
    }
}

fn validate_currency(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ImportIssue {
            row,
            field: "currency".to_string(),
            code: "missing_required_field".to_string(),
            description: "currency must be present and non-empty.".to_string(),
            expected: Some("non-empty string".to_string()),
            received: Some(String::new()),
        });
        return None;
    };
    Some(candidate.to_uppercase())
}

fn validate_payment_type(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<PaymentType> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ImportIssue {
            row,
            field: "payment_type".to_string(),
            code: "missing_required_field".to_string(),
            description: "payment_type must be present and non-empty.".to_string(),
            expected: Some("required|optional".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    let parsed = PaymentType::parse(&candidate);
    if parsed.is_none() {
        issues.push(ImportIssue {
            row,
            field: "payment_type".to_string(),
            code: "invalid_enum_value".to_string(),
            description: format!("payment_type must be required or optional; got \"{candidate}\""),
            expected: Some("required|optional".to_string()),
            received: Some(candidate),
        });
    }
    parsed
}

fn validate_payment_status(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<PaymentStatus> {
    let normalized = normalize_optional(value);
    let Some(candidate) = normalized else {
        issues.push(ImportIssue {
            row,
            field: "payment_status".to_string(),
            code: "missing_required_field".to_string(),
            description: "payment_status must be present and non-empty.".to_string(),
            expected: Some("paid|unpaid|pending".to_string()),
            received: Some(String::new()),
        });
        return None;
    };

    let parsed = PaymentStatus::parse(&candidate);
    if parsed.is_none() {
        issues.push(ImportIssue {
            row,
            field: "payment_status".to_string(),
            code: "invalid_enum_value".to_string(),
            description: format!(
                "payment_status must be paid, unpaid, or pending; got \"{candidate}\""
            ),
            expected: Some("paid|unpaid|pending".to_string()),
            received: Some(candidate),
        });
    }
    parsed
}

// Optional at import, but when present it must be a real YYYY-MM-DD date so
// the ledger never stores a due date the classifier would reject.
fn validate_due_date(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value)?;

    if !looks_like_iso_date(&normalized)
        || chrono::NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").is_err()
    {
        issues.push(ImportIssue {
            row,
            field: "due_date".to_string(),
            code: "invalid_date".to_string(),
            description: format!("due_date must be YYYY-MM-DD when present; got \"{normalized}\""),
            expected: Some("YYYY-MM-DD".to_string()),
            received: Some(normalized),
        });
        return None;
    }

    Some(normalized)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
