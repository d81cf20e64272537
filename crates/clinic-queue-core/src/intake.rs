//! Front-desk registration input and its validation.
//!
//! The queue stores whatever it is given; these checks run before
//! `PriorityQueue::insert` on behalf of the presentation layer.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Entry, Specialty};
use crate::queue::PriorityQueue;

/// Form date format (DD/MM/YYYY).
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// Form time format (HH:MM).
pub const TIME_FORMAT: &str = "%H:%M";

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Patient name is required")]
    NameRequired,

    #[error("Patient name may only contain letters, spaces, apostrophes and hyphens")]
    InvalidName,

    #[error("Phone is required")]
    PhoneRequired,

    #[error("Phone may only contain digits")]
    InvalidPhone,

    #[error("Date is required")]
    DateRequired,

    #[error("Time is required")]
    TimeRequired,

    #[error("A specialty must be selected")]
    SpecialtyRequired,

    #[error("Unknown specialty: {0}")]
    UnknownSpecialty(String),
}

/// Every failure found in one registration attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    /// One message per failure, in field order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.to_string()).collect()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw registration form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub specialty: String,
    pub is_emergency: bool,
}

/// A registration that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    name: String,
    phone: String,
    date: String,
    time: String,
    specialty: Specialty,
    is_emergency: bool,
}

impl Registration {
    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<ValidRegistration, ValidationErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::NameRequired);
        } else if !is_valid_name(name) {
            errors.push(ValidationError::InvalidName);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(ValidationError::PhoneRequired);
        } else if !phone.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::InvalidPhone);
        }

        let date = self.date.trim();
        if date.is_empty() {
            errors.push(ValidationError::DateRequired);
        }

        let time = self.time.trim();
        if time.is_empty() {
            errors.push(ValidationError::TimeRequired);
        }

        let specialty = match self.specialty.trim() {
            "" => {
                errors.push(ValidationError::SpecialtyRequired);
                None
            }
            text => match text.parse::<Specialty>() {
                Ok(specialty) => Some(specialty),
                Err(e) => {
                    errors.push(ValidationError::UnknownSpecialty(e.0));
                    None
                }
            },
        };

        match specialty {
            Some(specialty) if errors.is_empty() => Ok(ValidRegistration {
                name: name.to_string(),
                phone: phone.to_string(),
                date: date.to_string(),
                time: time.to_string(),
                specialty,
                is_emergency: self.is_emergency,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

impl ValidRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    pub fn is_emergency(&self) -> bool {
        self.is_emergency
    }

    /// Register the patient in `queue`.
    pub fn enqueue(self, queue: &mut PriorityQueue) -> &Entry {
        queue.insert(
            self.name,
            self.phone,
            self.date,
            self.time,
            self.specialty,
            self.is_emergency,
        )
    }
}

/// Letters (accented included), plain spaces, apostrophe and hyphen.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '\'' || c == '-')
}

/// Date and time the registration form is prefilled with.
pub fn default_date_time<Tz: TimeZone>(now: DateTime<Tz>) -> (String, String)
where
    Tz::Offset: fmt::Display,
{
    (
        now.format(DATE_FORMAT).to_string(),
        now.format(TIME_FORMAT).to_string(),
    )
}

/// Prefilled date and time in local time.
pub fn default_date_time_now() -> (String, String) {
    default_date_time(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn valid() -> Registration {
        Registration {
            name: "María O'Neil-Gómez".into(),
            phone: "5551234".into(),
            date: "01/01/2030".into(),
            time: "09:00".into(),
            specialty: "Pediatría".into(),
            is_emergency: false,
        }
    }

    #[test]
    fn test_valid_registration() {
        let ok = valid().validate().unwrap();
        assert_eq!(ok.name(), "María O'Neil-Gómez");
        assert_eq!(ok.specialty(), Specialty::Pediatrics);
        assert!(!ok.is_emergency());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut reg = valid();
        reg.name = "  Ana  ".into();
        reg.phone = " 111 ".into();
        let ok = reg.validate().unwrap();
        assert_eq!(ok.name(), "Ana");
    }

    #[test]
    fn test_collects_all_errors() {
        let reg = Registration::default();
        let errors = reg.validate().unwrap_err();
        assert_eq!(
            errors.0,
            vec![
                ValidationError::NameRequired,
                ValidationError::PhoneRequired,
                ValidationError::DateRequired,
                ValidationError::TimeRequired,
                ValidationError::SpecialtyRequired,
            ]
        );
    }

    #[test]
    fn test_rejects_bad_characters() {
        let mut reg = valid();
        reg.name = "Ana3".into();
        reg.phone = "555-1234".into();
        let errors = reg.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidName));
        assert!(errors.contains(&ValidationError::InvalidPhone));
        assert_eq!(errors.0.len(), 2);
    }

    #[test]
    fn test_date_and_time_only_need_presence() {
        let mut queue = PriorityQueue::new();
        for (date, time) in [("31/02/2030", "25:00"), ("mañana", "9h"), ("1/1/2030", "9:00")] {
            let mut reg = valid();
            reg.date = date.into();
            reg.time = time.into();
            let entry = reg.validate().unwrap().enqueue(&mut queue);
            assert_eq!(entry.date, date);
            assert_eq!(entry.time, time);
        }
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_name_rejects_tabs_and_newlines() {
        assert!(is_valid_name("Ana María"));
        assert!(!is_valid_name("Ana\tMaría"));
        assert!(!is_valid_name("Ana\nMaría"));
        assert!(!is_valid_name("Ana\u{a0}María"));

        let mut reg = valid();
        reg.name = "Ana\tMaría".into();
        let errors = reg.validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::InvalidName]);
    }

    #[test]
    fn test_unknown_specialty() {
        let mut reg = valid();
        reg.specialty = "Odontología".into();
        let errors = reg.validate().unwrap_err();
        assert_eq!(
            errors.0,
            vec![ValidationError::UnknownSpecialty("Odontología".into())]
        );
    }

    #[test]
    fn test_enqueue_inserts() {
        let mut queue = PriorityQueue::new();
        let mut reg = valid();
        reg.is_emergency = true;
        let entry = reg.validate().unwrap().enqueue(&mut queue);
        assert!(entry.is_emergency);
        assert_eq!(entry.specialty, Specialty::Pediatrics);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_error_display_joins_messages() {
        let errors = ValidationErrors(vec![
            ValidationError::NameRequired,
            ValidationError::PhoneRequired,
        ]);
        assert_eq!(
            errors.to_string(),
            "Patient name is required; Phone is required"
        );
    }

    #[test]
    fn test_default_date_time_format() {
        let now = Utc.with_ymd_and_hms(2030, 3, 7, 8, 5, 0).unwrap();
        let (date, time) = default_date_time(now);
        assert_eq!(date, "07/03/2030");
        assert_eq!(time, "08:05");
    }
}
