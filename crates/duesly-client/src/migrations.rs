use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

pub const REQUIRED_VIEW_NAMES: [&str; 2] = ["v1_requests", "v1_imports"];

pub const REQUIRED_INDEX_NAMES: [&str; 3] = [
    "idx_internal_payment_requests_import_id",
    "idx_internal_payment_requests_due_date",
    "idx_internal_import_runs_created_at_desc",
];

pub const REQUIRED_META_KEYS: [(&str, &str); 3] = [
    ("schema_version", "v1"),
    ("public_views_version", "v1"),
    ("import_contract_version", "v1"),
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![M::up(BOOTSTRAP_SQL)]);
    migrations.to_latest(conn)
}

#[cfg(test)]
mod tests {
    use super::{BOOTSTRAP_SQL, REQUIRED_INDEX_NAMES, REQUIRED_VIEW_NAMES};

    #[test]
    fn bootstrap_sql_creates_every_required_object() {
        for name in REQUIRED_VIEW_NAMES
            .iter()
            .chain(REQUIRED_INDEX_NAMES.iter())
        {
            assert!(BOOTSTRAP_SQL.contains(name), "missing object: {name}");
        }
    }
}
