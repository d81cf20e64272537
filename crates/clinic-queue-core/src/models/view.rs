//! Read-only projections of the queue handed to presentation.

use serde::{Deserialize, Serialize};

use super::entry::{Entry, EntryKind};
use super::specialty::Specialty;

/// One row of the waiting-room board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryView {
    /// 1-based rank; 1 is called next
    pub position: usize,
    pub id: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub specialty: Specialty,
    pub kind: EntryKind,
    /// Whole minutes since registration
    pub wait_minutes: u64,
}

impl EntryView {
    pub(crate) fn new(position: usize, entry: &Entry, wait_minutes: u64) -> Self {
        Self {
            position,
            id: entry.id.clone(),
            name: entry.name.clone(),
            phone: entry.phone.clone(),
            date: entry.date.clone(),
            time: entry.time.clone(),
            specialty: entry.specialty,
            kind: entry.kind(),
            wait_minutes,
        }
    }
}

/// Aggregate queue statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueStats {
    pub total: usize,
    pub emergency_count: usize,
    pub normal_count: usize,
    /// Floor of the mean wait, 0 when empty
    pub average_wait_minutes: u64,
}

/// A lookup hit: the entry and its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub entry: &'a Entry,
    pub position: usize,
}
