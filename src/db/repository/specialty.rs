use rusqlite::Connection;

use crate::db::DatabaseError;

/// Specialty names in display order.
pub fn get_all_specialties(conn: &Connection) -> Result<Vec<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT name FROM specialty ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
