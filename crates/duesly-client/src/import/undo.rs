use std::path::Path;

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};

use crate::import::persist::now_timestamp;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct UndoResult {
    pub(crate) import_id: String,
    pub(crate) rows_reverted: i64,
}

pub(crate) fn undo_import(
    connection: &mut Connection,
    db_path: &Path,
    import_id: &str,
) -> ClientResult<UndoResult> {
    let timestamp = now_timestamp();
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let status = transaction
        .query_row(
            "SELECT status FROM internal_import_runs WHERE import_id = ?1 LIMIT 1",
            params![import_id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let Some(current_status) = status else {
        return Err(ClientError::import_id_not_found(import_id));
    };
    if current_status == "reverted" {
        return Err(ClientError::import_already_reverted(import_id));
    }
    if current_status != "committed" {
        return Err(ClientError::ledger_corrupt(db_path));
    }

    let rows_reverted = transaction
        .execute(
            "DELETE FROM internal_payment_requests WHERE import_id = ?1",
            params![import_id],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))? as i64;

    transaction
        .execute(
            "UPDATE internal_import_runs
             SET status = 'reverted', reverted_at = ?2
             WHERE import_id = ?1",
            params![import_id, &timestamp],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(UndoResult {
        import_id: import_id.to_string(),
        rows_reverted,
    })
}
