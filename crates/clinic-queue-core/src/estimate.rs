//! Wait-time estimates reported back to patients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntryKind, Specialty};
use crate::queue::PriorityQueue;

/// Minutes assumed per consultation when nothing else is configured.
pub const DEFAULT_CONSULTATION_MINUTES: u32 = 15;

/// Front-desk configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueConfig {
    /// Fixed length of one consultation, in minutes
    pub consultation_minutes: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            consultation_minutes: DEFAULT_CONSULTATION_MINUTES,
        }
    }
}

/// Minutes until a patient at `position` is called: one consultation per
/// patient ahead of them.
pub fn estimated_remaining_minutes(position: usize, consultation_minutes: u32) -> u64 {
    (position.saturating_sub(1) as u64).saturating_mul(consultation_minutes as u64)
}

/// Where a patient stands and how long they have left.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitReport {
    pub name: String,
    pub position: usize,
    pub kind: EntryKind,
    pub specialty: Specialty,
    pub waited_minutes: u64,
    pub estimated_remaining_minutes: u64,
}

impl WaitReport {
    /// Build the report for the first patient matching `name`.
    pub fn for_patient(
        queue: &PriorityQueue,
        name: &str,
        config: &QueueConfig,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let hit = queue.find(name)?;
        Some(Self {
            name: hit.entry.name.clone(),
            position: hit.position,
            kind: hit.entry.kind(),
            specialty: hit.entry.specialty,
            waited_minutes: hit.entry.wait_minutes(now),
            estimated_remaining_minutes: estimated_remaining_minutes(
                hit.position,
                config.consultation_minutes,
            ),
        })
    }
}
