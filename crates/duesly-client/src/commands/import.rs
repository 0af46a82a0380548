use std::path::Path;

use crate::commands::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ImportData, ImportListData, ImportListItem, ImportUndoData};
use crate::import;
use crate::state::{map_sqlite_error, open_connection};
use crate::ClientResult;

#[derive(Debug, Default)]
pub struct ImportRunOptions<'a> {
    pub path: Option<String>,
    pub dry_run: bool,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportListOptions<'a> {
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ImportUndoOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run(path: Option<String>, dry_run: bool) -> ClientResult<SuccessEnvelope> {
    run_with_options(ImportRunOptions {
        path,
        dry_run,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let execution = import::execute(
        &setup,
        options.path.clone(),
        options.dry_run,
        options.stdin_override,
    )?;

    success(
        "import",
        ImportData {
            dry_run: execution.dry_run,
            path: options.path,
            import_id: execution.import_id,
            message: execution.message,
            summary: execution.summary,
            next_step: execution.next_step,
            source_used: execution.source_used,
        },
    )
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(ImportListOptions {
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: ImportListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = std::path::PathBuf::from(&setup.db_path);
    let connection = open_connection(&db_path)?;

    let mut statement = connection
        .prepare(
            "SELECT
                import_id,
                status,
                created_at,
                reverted_at,
                rows_read,
                rows_valid,
                rows_invalid,
                inserted,
                source_kind,
                source_ref
             FROM internal_import_runs
             ORDER BY CAST(created_at AS INTEGER) DESC, import_id DESC",
        )
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let rows_iter = statement
        .query_map([], |row| {
            Ok(ImportListItem {
                import_id: row.get(0)?,
                status: row.get(1)?,
                created_at: row.get(2)?,
                reverted_at: row.get::<_, Option<String>>(3)?,
                rows_read: row.get(4)?,
                rows_valid: row.get(5)?,
                rows_invalid: row.get(6)?,
                inserted: row.get(7)?,
                source_kind: row.get::<_, Option<String>>(8)?,
                source_ref: row.get::<_, Option<String>>(9)?,
            })
        })
        .map_err(|error| map_sqlite_error(&db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        let item = row.map_err(|error| map_sqlite_error(&db_path, &error))?;
        rows.push(item);
    }

    success("import list", ImportListData { rows })
}

pub fn undo(import_id: &str) -> ClientResult<SuccessEnvelope> {
    undo_with_options(
        import_id,
        ImportUndoOptions {
            home_override: None,
        },
    )
}

#[doc(hidden)]
pub fn undo_with_options(
    import_id: &str,
    options: ImportUndoOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let db_path = std::path::PathBuf::from(&setup.db_path);
    let mut connection = open_connection(&db_path)?;
    let result = import::undo::undo_import(&mut connection, &db_path, import_id)?;

    success(
        "import undo",
        ImportUndoData {
            import_id: result.import_id,
            message: "Import reverted successfully.".to_string(),
            rows_reverted: result.rows_reverted,
        },
    )
}
