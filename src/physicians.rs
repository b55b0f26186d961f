//! Physician repository — lifecycle of physician records with optimistic
//! concurrency.
//!
//! A `PhysicianRepository` knows where the database lives. Each operation
//! opens its own connection and drops it before returning, so any number of
//! handles (per request, per thread, long-lived) can point at one file. The
//! version check on update is enforced by SQLite inside a single statement.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::Connection;

use crate::config;
use crate::db::{self, DatabaseError, ErrorKind, Repository, SpecialtyProvider};
use crate::models::{Physician, PhysicianDetails};

#[derive(Debug, Clone)]
pub struct PhysicianRepository {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl PhysicianRepository {
    /// Open the database at `db_path` with the configured busy timeout,
    /// creating the file and applying migrations if needed.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        Self::open_with_timeout(db_path, config::busy_timeout())
    }

    pub fn open_with_timeout(
        db_path: impl Into<PathBuf>,
        busy_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // Migrations run once here; per-operation connections skip them.
        db::open_database(&db_path, busy_timeout)?;
        tracing::debug!("Physician repository ready at {}", db_path.display());
        Ok(Self {
            db_path,
            busy_timeout,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Specialty vocabulary stored in the same database.
    pub fn specialties(&self) -> SpecialtyList {
        SpecialtyList {
            db_path: self.db_path.clone(),
            busy_timeout: self.busy_timeout,
        }
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        db::open_connection(&self.db_path, self.busy_timeout)
    }
}

impl Repository<Physician, PhysicianDetails> for PhysicianRepository {
    fn create(&self, details: &PhysicianDetails) -> Result<Physician, DatabaseError> {
        tracing::debug!("Creating physician {}, {}", details.last_name, details.first_name);
        let conn = self.connect()?;
        let physician = db::insert_physician(&conn, details, db::now_timestamp())?;
        tracing::info!("Created physician #{}", physician.id);
        Ok(physician)
    }

    fn read_by_id(&self, id: i64) -> Result<Option<Physician>, DatabaseError> {
        tracing::debug!("Reading physician #{id}");
        let conn = self.connect()?;
        db::get_physician(&conn, id)
    }

    fn read_all(&self) -> Result<Vec<Physician>, DatabaseError> {
        let conn = self.connect()?;
        let physicians = db::get_all_physicians(&conn)?;
        tracing::debug!("Read {} physicians", physicians.len());
        Ok(physicians)
    }

    fn update(&self, physician: &Physician) -> Result<Physician, DatabaseError> {
        tracing::debug!(
            "Updating physician #{} at version {}",
            physician.id,
            physician.version
        );
        let conn = self.connect()?;
        match db::update_physician(&conn, physician) {
            Ok(updated) => {
                tracing::info!("Updated physician #{} to version {}", updated.id, updated.version);
                Ok(updated)
            }
            Err(e) => {
                if e.kind() != ErrorKind::Persistence {
                    tracing::warn!("Update of physician #{} refused: {e}", physician.id);
                }
                Err(e)
            }
        }
    }

    fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        tracing::debug!("Deleting physician #{id}");
        let conn = self.connect()?;
        db::delete_physician(&conn, id).inspect_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                tracing::warn!("Physician #{id} already gone");
            }
        })
    }
}

/// Specialty list backed by the `specialty` table.
#[derive(Debug, Clone)]
pub struct SpecialtyList {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl SpecialtyProvider for SpecialtyList {
    fn read_all_specialties(&self) -> Result<Vec<String>, DatabaseError> {
        let conn = db::open_connection(&self.db_path, self.busy_timeout)?;
        db::get_all_specialties(&conn)
    }
}
