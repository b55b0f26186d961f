//! Repository layer — entity-scoped database operations.
//!
//! Sub-modules hold plain functions over a borrowed `Connection`. The traits
//! below are the seams callers program against.

mod physician;
mod specialty;

use super::DatabaseError;

/// Lifecycle operations for an entity `T` created from details `D`.
pub trait Repository<T, D> {
    fn create(&self, details: &D) -> Result<T, DatabaseError>;
    fn read_by_id(&self, id: i64) -> Result<Option<T>, DatabaseError>;
    fn read_all(&self) -> Result<Vec<T>, DatabaseError>;
    fn update(&self, entity: &T) -> Result<T, DatabaseError>;
    fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;
}

/// Source of the controlled specialty vocabulary.
pub trait SpecialtyProvider {
    fn read_all_specialties(&self) -> Result<Vec<String>, DatabaseError>;
}

// Re-export all public items from sub-modules
pub use physician::*;
pub use specialty::*;
