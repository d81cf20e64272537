//! Clinic specialties offered at the front desk.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when text does not name a known specialty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown specialty: {0}")]
pub struct ParseSpecialtyError(pub String);

/// A medical specialty a patient can be queued for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Specialty {
    #[serde(rename = "Medicina General")]
    GeneralMedicine,
    #[serde(rename = "Cardiología")]
    Cardiology,
    #[serde(rename = "Dermatología")]
    Dermatology,
    #[serde(rename = "Neurología")]
    Neurology,
    #[serde(rename = "Pediatría")]
    Pediatrics,
    #[serde(rename = "Ginecología")]
    Gynecology,
    #[serde(rename = "Traumatología")]
    Traumatology,
}

impl Specialty {
    /// All specialties, in the order the registration form lists them.
    pub const ALL: [Specialty; 7] = [
        Specialty::GeneralMedicine,
        Specialty::Cardiology,
        Specialty::Dermatology,
        Specialty::Neurology,
        Specialty::Pediatrics,
        Specialty::Gynecology,
        Specialty::Traumatology,
    ];

    /// Display label shown to the receptionist.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::GeneralMedicine => "Medicina General",
            Specialty::Cardiology => "Cardiología",
            Specialty::Dermatology => "Dermatología",
            Specialty::Neurology => "Neurología",
            Specialty::Pediatrics => "Pediatría",
            Specialty::Gynecology => "Ginecología",
            Specialty::Traumatology => "Traumatología",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = ParseSpecialtyError;

    /// Parse a label, ignoring case, surrounding whitespace and accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s.trim());
        Specialty::ALL
            .into_iter()
            .find(|specialty| fold(specialty.label()) == wanted)
            .ok_or_else(|| ParseSpecialtyError(s.trim().to_string()))
    }
}

/// Lowercase and strip Spanish diacritics.
fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}
