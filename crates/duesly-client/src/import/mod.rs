pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod persist;
pub(crate) mod undo;
pub(crate) mod validate;

use std::path::PathBuf;

use crate::contracts::types::{ImportNextStep, ImportSummary};
use crate::error::IMPORT_HELP_COMMAND;
use crate::setup::SetupContext;
use crate::state::open_connection;
use crate::{ClientError, ClientResult};

/// One fully validated payment request, ready to insert.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalRequest {
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub payment_type: String,
    pub payment_status: String,
    pub due_date: Option<String>,
    pub member: Option<String>,
    pub external_id: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ImportExecutionResult {
    pub dry_run: bool,
    pub import_id: Option<String>,
    pub message: String,
    pub summary: ImportSummary,
    pub next_step: ImportNextStep,
    pub source_used: Option<String>,
}

pub(crate) fn execute(
    setup: &SetupContext,
    path: Option<String>,
    dry_run: bool,
    stdin_override: Option<String>,
) -> ClientResult<ImportExecutionResult> {
    let resolved_source = input::resolve_source(path, stdin_override)?;
    let parsed_rows = parse::parse_source(&resolved_source.content)?;
    let validated = validate::validate_rows(parsed_rows)?;

    if dry_run {
        let summary = ImportSummary {
            rows_read: validated.summary.rows_read,
            rows_valid: validated.summary.rows_valid,
            rows_invalid: validated.summary.rows_invalid,
            inserted: 0,
        };

        return Ok(ImportExecutionResult {
            dry_run: true,
            import_id: None,
            message: "Validation passed. No rows were written.".to_string(),
            summary,
            next_step: commit_next_step(resolved_source.source_kind.as_str()),
            source_used: resolved_source.source_used,
        });
    }

    let db_path = PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let persisted = persist::persist_import(
        &mut connection,
        &db_path,
        persist::PersistInput {
            rows: &validated.rows,
            rows_read: validated.summary.rows_read,
            rows_valid: validated.summary.rows_valid,
            rows_invalid: validated.summary.rows_invalid,
            source_kind: resolved_source.source_kind.as_str(),
            source_ref: resolved_source.source_ref.as_deref(),
        },
    )?;

    let summary = ImportSummary {
        rows_read: validated.summary.rows_read,
        rows_valid: validated.summary.rows_valid,
        rows_invalid: validated.summary.rows_invalid,
        inserted: persisted.inserted,
    };

    Ok(ImportExecutionResult {
        dry_run: false,
        import_id: Some(persisted.import_id),
        message: "Import completed successfully.".to_string(),
        summary,
        next_step: ImportNextStep {
            label: "Review what is due".to_string(),
            command: "duesly request list --filter upcoming".to_string(),
        },
        source_used: resolved_source.source_used,
    })
}

fn commit_next_step(source_kind: &str) -> ImportNextStep {
    let command = match source_kind {
        "stdin" => "duesly import create",
        _ => "duesly import create <path>",
    };
    ImportNextStep {
        label: "Commit this import".to_string(),
        command: command.to_string(),
    }
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide JSON array or CSV input via path or stdin.".to_string(),
            format!("Run `{IMPORT_HELP_COMMAND}` to confirm import field requirements."),
        ],
    )
}
