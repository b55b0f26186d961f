use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Editable fields of a physician record, as entered on a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicianDetails {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
}

/// A stored physician record.
///
/// `version` is the optimistic-concurrency token: an update must carry the
/// version the caller last read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physician {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub specialty: String,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub version: i64,
}

impl Physician {
    pub fn details(&self) -> PhysicianDetails {
        PhysicianDetails {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            specialty: self.specialty.clone(),
        }
    }

    /// Replace every editable field, keeping identity and version.
    pub fn apply(&mut self, details: PhysicianDetails) {
        self.last_name = details.last_name;
        self.first_name = details.first_name;
        self.email = details.email;
        self.phone = details.phone;
        self.specialty = details.specialty;
    }
}

impl fmt::Display for Physician {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}, {} <{}> {} [{}] v{}",
            self.id,
            self.last_name,
            self.first_name,
            self.email,
            self.phone,
            self.specialty,
            self.version
        )
    }
}
