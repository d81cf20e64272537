//! Queue entry models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::specialty::Specialty;

/// Priority tier of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    Emergency,
    Normal,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Emergency => "EMERGENCY",
            EntryKind::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered patient awaiting consultation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Local UUID, generated at registration (row identity only)
    pub id: String,
    /// Patient name, also the lookup key
    pub name: String,
    /// Contact phone (digits)
    pub phone: String,
    /// Appointment date as entered (DD/MM/YYYY)
    pub date: String,
    /// Appointment time as entered (HH:MM)
    pub time: String,
    /// Requested specialty
    pub specialty: Specialty,
    /// Emergency flag, fixed at registration
    pub is_emergency: bool,
    /// Registration timestamp, source of wait time
    pub registered_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry registered now.
    pub fn new(
        name: String,
        phone: String,
        date: String,
        time: String,
        specialty: Specialty,
        is_emergency: bool,
    ) -> Self {
        Self::registered_at(name, phone, date, time, specialty, is_emergency, Utc::now())
    }

    /// Create an entry with an explicit registration timestamp.
    pub fn registered_at(
        name: String,
        phone: String,
        date: String,
        time: String,
        specialty: Specialty,
        is_emergency: bool,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
            date,
            time,
            specialty,
            is_emergency,
            registered_at,
        }
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_emergency {
            EntryKind::Emergency
        } else {
            EntryKind::Normal
        }
    }

    /// Case-insensitive exact comparison against the patient name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Whole minutes waited as of `now`. Never negative.
    pub fn wait_minutes(&self, now: DateTime<Utc>) -> u64 {
        (now - self.registered_at).num_minutes().max(0) as u64
    }

    /// Milliseconds waited as of `now`, for averaging. Never negative.
    pub(crate) fn wait_millis(&self, now: DateTime<Utc>) -> u64 {
        (now - self.registered_at).num_milliseconds().max(0) as u64
    }
}
