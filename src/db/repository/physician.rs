//! SQL for the `physician` table.
//!
//! Every function takes a borrowed connection; opening and releasing
//! connections is the caller's job.

use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

const ENTITY: &str = "Physician";

const SELECT_PHYSICIAN: &str =
    "SELECT id, last_name, first_name, email, phone, specialty, created, updated, version
     FROM physician";

fn physician_from_row(row: &Row<'_>) -> rusqlite::Result<Physician> {
    Ok(Physician {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        specialty: row.get(5)?,
        created: row.get(6)?,
        updated: row.get(7)?,
        version: row.get(8)?,
    })
}

/// Current time at the precision the table keeps.
pub fn now_timestamp() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Timestamp for a write that follows `previous`, strictly later than it
/// even when the clock has not moved on.
pub fn next_timestamp(previous: NaiveDateTime) -> NaiveDateTime {
    let now = now_timestamp();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Constraint failures get their own variant so callers can tell a rejected
/// write from a broken connection.
fn classify_write_error(err: rusqlite::Error) -> DatabaseError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, ref message)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DatabaseError::ConstraintViolation(
                message.clone().unwrap_or_else(|| failure.to_string()),
            )
        }
        other => DatabaseError::Sqlite(other),
    }
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity_type: ENTITY.into(),
        id: id.to_string(),
    }
}

fn conflict(id: i64, expected: i64, actual: i64) -> DatabaseError {
    DatabaseError::Conflict {
        entity_type: ENTITY.into(),
        id: id.to_string(),
        expected,
        actual,
    }
}

/// Insert a new physician at version 1. The id comes from the table.
pub fn insert_physician(
    conn: &Connection,
    details: &PhysicianDetails,
    now: NaiveDateTime,
) -> Result<Physician, DatabaseError> {
    conn.execute(
        "INSERT INTO physician (last_name, first_name, email, phone, specialty, created, updated, version)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, 1)",
        params![
            details.last_name,
            details.first_name,
            details.email,
            details.phone,
            details.specialty,
            now,
        ],
    )
    .map_err(classify_write_error)?;

    Ok(Physician {
        id: conn.last_insert_rowid(),
        last_name: details.last_name.clone(),
        first_name: details.first_name.clone(),
        email: details.email.clone(),
        phone: details.phone.clone(),
        specialty: details.specialty.clone(),
        created: now,
        updated: now,
        version: 1,
    })
}

pub fn get_physician(conn: &Connection, id: i64) -> Result<Option<Physician>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_PHYSICIAN} WHERE id = ?1"))?;
    let physician = stmt
        .query_row(params![id], physician_from_row)
        .optional()?;
    Ok(physician)
}

/// All physicians in insertion order.
pub fn get_all_physicians(conn: &Connection) -> Result<Vec<Physician>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_PHYSICIAN} ORDER BY id"))?;
    let rows = stmt.query_map([], physician_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-field update guarded by the caller's version.
///
/// The write itself is a single `UPDATE ... WHERE id = ? AND version = ?`,
/// so of two writers holding the same version only one can match a row.
/// A zero row count after the initial check means another writer got there
/// first; the row is read again to report which way it lost.
pub fn update_physician(
    conn: &Connection,
    edited: &Physician,
) -> Result<Physician, DatabaseError> {
    let current = get_physician(conn, edited.id)?.ok_or_else(|| not_found(edited.id))?;
    if current.version != edited.version {
        return Err(conflict(edited.id, edited.version, current.version));
    }

    let updated_at = next_timestamp(current.updated);
    let changed = conn
        .execute(
            "UPDATE physician SET
             last_name = ?1,
             first_name = ?2,
             email = ?3,
             phone = ?4,
             specialty = ?5,
             updated = ?6,
             version = version + 1
             WHERE id = ?7 AND version = ?8",
            params![
                edited.last_name,
                edited.first_name,
                edited.email,
                edited.phone,
                edited.specialty,
                updated_at,
                edited.id,
                edited.version,
            ],
        )
        .map_err(classify_write_error)?;

    if changed == 0 {
        return Err(match get_physician(conn, edited.id)? {
            None => not_found(edited.id),
            Some(stored) => conflict(edited.id, edited.version, stored.version),
        });
    }

    let mut stored = current;
    stored.apply(edited.details());
    stored.updated = updated_at;
    stored.version += 1;
    Ok(stored)
}

/// Hard-delete a physician.
pub fn delete_physician(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM physician WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(not_found(id));
    }
    Ok(())
}
