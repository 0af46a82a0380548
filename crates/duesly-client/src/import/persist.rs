use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, TransactionBehavior, params};
use ulid::Ulid;

use crate::ClientResult;
use crate::import::CanonicalRequest;
use crate::state::map_sqlite_error;

#[derive(Debug, Clone)]
pub(crate) struct PersistResult {
    pub(crate) import_id: String,
    pub(crate) inserted: i64,
}

pub(crate) struct PersistInput<'a> {
    pub(crate) rows: &'a [CanonicalRequest],
    pub(crate) rows_read: i64,
    pub(crate) rows_valid: i64,
    pub(crate) rows_invalid: i64,
    pub(crate) source_kind: &'a str,
    pub(crate) source_ref: Option<&'a str>,
}

pub(crate) fn persist_import(
    connection: &mut Connection,
    db_path: &Path,
    input: PersistInput<'_>,
) -> ClientResult<PersistResult> {
    let import_id = format!("imp_{}", Ulid::new());
    let timestamp = now_timestamp();

    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut inserted = 0_i64;
    for request in input.rows {
        insert_request_row(&transaction, db_path, &import_id, request)?;
        inserted += 1;
    }

    transaction
        .execute(
            "INSERT INTO internal_import_runs (
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
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &import_id,
                "committed",
                &timestamp,
                Option::<String>::None,
                input.rows_read,
                input.rows_valid,
                input.rows_invalid,
                inserted,
                input.source_kind,
                input.source_ref
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(PersistResult {
        import_id,
        inserted,
    })
}

fn insert_request_row(
    transaction: &rusqlite::Transaction<'_>,
    db_path: &Path,
    import_id: &str,
    request: &CanonicalRequest,
) -> ClientResult<()> {
    let request_id = format!("req_{}", Ulid::new());
    transaction
        .execute(
            "INSERT INTO internal_payment_requests (
                request_id,
                import_id,
                title,
                amount,
                currency,
                payment_type,
                payment_status,
                due_date,
                member,
                external_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &request_id,
                import_id,
                &request.title,
                request.amount,
                &request.currency,
                &request.payment_type,
                &request.payment_status,
                &request.due_date,
                &request.member,
                &request.external_id
            ],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(())
}

pub(crate) fn now_timestamp() -> String {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0);
    seconds.to_string()
}
