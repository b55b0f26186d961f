//! Form validation for physician input.
//!
//! Runs in the front end before anything reaches the repository. The
//! repository itself stores whatever it is given, apart from the non-empty
//! name constraint the table enforces.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::PhysicianDetails;

pub const MAX_NAME_LEN: usize = 50;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9. ()-]{7,25}$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be {max} characters or fewer", max = MAX_NAME_LEN)]
    TooLong { field: &'static str },

    #[error("Invalid email format: {0}")]
    Email(String),

    #[error("Invalid phone number format: {0}")]
    Phone(String),

    #[error("Unknown specialty: {0}")]
    Specialty(String),
}

pub fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong { field });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Email(email.into()))
    }
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Phone(phone.into()))
    }
}

pub fn validate_specialty(specialty: &str, specialties: &[String]) -> Result<(), ValidationError> {
    if specialties.iter().any(|s| s == specialty.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Specialty(specialty.into()))
    }
}

/// Check every field, collecting all problems rather than stopping at the first.
pub fn validate_details(
    details: &PhysicianDetails,
    specialties: &[String],
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_name("Last name", &details.last_name) {
        errors.push(e);
    }
    if let Err(e) = validate_name("First name", &details.first_name) {
        errors.push(e);
    }
    if let Err(e) = validate_email(&details.email) {
        errors.push(e);
    }
    if let Err(e) = validate_phone(&details.phone) {
        errors.push(e);
    }
    if let Err(e) = validate_specialty(&details.specialty, specialties) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Trim surrounding whitespace from every field, as a form would on submit.
pub fn normalize(details: PhysicianDetails) -> PhysicianDetails {
    PhysicianDetails {
        last_name: details.last_name.trim().to_string(),
        first_name: details.first_name.trim().to_string(),
        email: details.email.trim().to_string(),
        phone: details.phone.trim().to_string(),
        specialty: details.specialty.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialties() -> Vec<String> {
        vec!["Cardiology".into(), "Neurology".into()]
    }

    fn jane() -> PhysicianDetails {
        PhysicianDetails {
            last_name: "Smith".into(),
            first_name: "Jane".into(),
            email: "jane@x.com".into(),
            phone: "613-555-0100".into(),
            specialty: "Cardiology".into(),
        }
    }

    #[test]
    fn valid_details_pass() {
        assert!(validate_details(&jane(), &specialties()).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("jane@x.com").is_ok());
        assert!(validate_email("first.last+tag@clinic.on.ca").is_ok());
        assert!(validate_email("jane@x").is_err());
        assert!(validate_email("jane.x.com").is_err());
        assert!(validate_email("@x.com").is_err());
    }

    #[test]
    fn phone_shapes() {
        assert!(validate_phone("613-555-0100").is_ok());
        assert!(validate_phone("+1 (613) 555.0100").is_ok());
        assert!(validate_phone("555").is_err());
        assert!(validate_phone("613-555-ABCD").is_err());
    }

    #[test]
    fn empty_names_reported() {
        let mut details = jane();
        details.last_name = "   ".into();
        details.first_name = String::new();
        let errors = validate_details(&details, &specialties()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Required { field: "Last name" },
                ValidationError::Required { field: "First name" },
            ]
        );
    }

    #[test]
    fn long_name_rejected() {
        let mut details = jane();
        details.last_name = "x".repeat(MAX_NAME_LEN + 1);
        let errors = validate_details(&details, &specialties()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::TooLong { field: "Last name" }]);
    }

    #[test]
    fn unknown_specialty_rejected() {
        let mut details = jane();
        details.specialty = "Astrology".into();
        let errors = validate_details(&details, &specialties()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Specialty("Astrology".into())]);
    }

    #[test]
    fn all_errors_collected() {
        let details = PhysicianDetails {
            last_name: String::new(),
            first_name: "Jane".into(),
            email: "nope".into(),
            phone: "1".into(),
            specialty: "Unknown".into(),
        };
        let errors = validate_details(&details, &specialties()).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn normalize_trims_fields() {
        let details = PhysicianDetails {
            last_name: " Smith ".into(),
            first_name: "Jane\t".into(),
            email: " jane@x.com".into(),
            phone: "613-555-0100 ".into(),
            specialty: " Cardiology".into(),
        };
        assert_eq!(normalize(details), jane());
    }
}
