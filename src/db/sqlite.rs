use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path, busy_timeout: Duration) -> Result<Connection, DatabaseError> {
    let conn = open_connection(path, busy_timeout)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open a connection to an already-migrated database.
///
/// Used for per-operation connections once the schema is known to be current.
pub fn open_connection(path: &Path, busy_timeout: Duration) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(busy_timeout)?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;"
    )?;
    Ok(())
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn)?;

    let migrations: Vec<(i64, &str)> = vec![
        (1, include_str!("../../resources/migrations/001_initial.sql")),
        (2, include_str!("../../resources/migrations/002_specialty_seed.sql")),
    ];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| DatabaseError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // schema_version + specialty + physician
        let count = count_tables(&conn).unwrap();
        assert_eq!(count, 3, "Expected 3 tables, got {count}");
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        let version: i64 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 2);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        // Run migrations again — should not error
        let result = run_migrations(&conn);
        assert!(result.is_ok());

        let specialties: i64 = conn
            .query_row("SELECT COUNT(*) FROM specialty", [], |row| row.get(0))
            .unwrap();
        assert_eq!(specialties, 17);
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn empty_last_name_rejected_by_schema() {
        let conn = open_memory_database().unwrap();
        let result = conn.execute(
            "INSERT INTO physician (last_name, first_name, email, phone, specialty, created, updated)
             VALUES ('  ', 'Jane', 'jane@x.com', '613-555-0100', 'Cardiology', '2024-01-01', '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn database_opens_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("databank.db");
        let conn = open_database(&path, Duration::from_millis(500)).unwrap();
        assert_eq!(count_tables(&conn).unwrap(), 3);
        drop(conn);

        // Re-open — should be idempotent
        let conn2 = open_database(&path, Duration::from_millis(500)).unwrap();
        assert_eq!(count_tables(&conn2).unwrap(), 3);

        let plain = open_connection(&path, Duration::from_millis(500)).unwrap();
        assert_eq!(count_tables(&plain).unwrap(), 3);
    }

    #[test]
    fn fresh_database_is_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_current_version(&conn).unwrap(), 0);

        conn.execute_batch(
            "CREATE TABLE schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .unwrap();
        assert_eq!(get_current_version(&conn).unwrap(), 0);

        run_migrations(&conn).unwrap();
        assert_eq!(get_current_version(&conn).unwrap(), 2);
    }

    #[test]
    fn unreadable_version_table_fails_instead_of_remigrating() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE schema_version (label TEXT)").unwrap();

        assert!(get_current_version(&conn).is_err());
        assert!(run_migrations(&conn).is_err());
        // Nothing from migration 1 was applied.
        assert_eq!(count_tables(&conn).unwrap(), 1);
    }
}
