//! Two-tier patient queue.
//!
//! Emergencies always lead; each tier keeps arrival order:
//!
//! ```text
//!   front                                            back
//!   [ E1 | E2 | E3 ][ N1 | N2 | N3 | N4 ]
//!     ▲            ▲                   ▲
//!  call_next   emergency insert     normal insert
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::{Entry, EntryView, Located, QueueStats, Specialty};

/// Ordered queue of waiting patients.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    entries: VecDeque<Entry>,
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in consultation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Register a patient now and place them by priority.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        specialty: Specialty,
        is_emergency: bool,
    ) -> &Entry {
        let entry = Entry::new(
            name.into(),
            phone.into(),
            date.into(),
            time.into(),
            specialty,
            is_emergency,
        );
        self.push(entry)
    }

    /// Place a prebuilt entry by priority.
    ///
    /// Emergencies go right after the leading run of emergencies, normal
    /// entries go to the back.
    pub fn push(&mut self, entry: Entry) -> &Entry {
        let index = if entry.is_emergency {
            self.emergency_count()
        } else {
            self.entries.len()
        };

        info!(
            id = %entry.id,
            kind = %entry.kind(),
            position = index + 1,
            size = self.entries.len() + 1,
            "patient registered"
        );

        self.entries.insert(index, entry);
        &self.entries[index]
    }

    /// Remove and return the patient at position 1.
    pub fn call_next(&mut self) -> Option<Entry> {
        let entry = self.entries.pop_front();
        match &entry {
            Some(called) => info!(
                id = %called.id,
                kind = %called.kind(),
                size = self.entries.len(),
                "patient called"
            ),
            None => debug!("call_next on empty queue"),
        }
        entry
    }

    /// The patient who would be called next.
    pub fn peek(&self) -> Option<&Entry> {
        self.entries.front()
    }

    /// Remove the first entry whose name matches, ignoring case.
    pub fn cancel(&mut self, name: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            debug!(size = self.entries.len(), "cancel found no match");
            return false;
        };

        if let Some(removed) = self.entries.remove(index) {
            info!(
                id = %removed.id,
                position = index + 1,
                size = self.entries.len(),
                "appointment cancelled"
            );
        }
        true
    }

    /// First entry whose name matches, ignoring case, with its position.
    pub fn find(&self, name: &str) -> Option<Located<'_>> {
        let index = self.index_of(name)?;
        Some(Located {
            entry: &self.entries[index],
            position: index + 1,
        })
    }

    /// Board rows as of now.
    pub fn snapshot(&self) -> Vec<EntryView> {
        self.snapshot_at(Utc::now())
    }

    /// Board rows with wait times measured at `now`.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> Vec<EntryView> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryView::new(index + 1, entry, entry.wait_minutes(now)))
            .collect()
    }

    /// Aggregate statistics as of now.
    pub fn stats(&self) -> QueueStats {
        self.stats_at(Utc::now())
    }

    /// Aggregate statistics with wait times measured at `now`.
    pub fn stats_at(&self, now: DateTime<Utc>) -> QueueStats {
        let mut stats = QueueStats::default();
        let mut total_wait_millis: u64 = 0;

        for entry in &self.entries {
            stats.total += 1;
            if entry.is_emergency {
                stats.emergency_count += 1;
            }
            total_wait_millis = total_wait_millis.saturating_add(entry.wait_millis(now));
        }

        stats.normal_count = stats.total - stats.emergency_count;
        if stats.total > 0 {
            stats.average_wait_minutes = total_wait_millis / (stats.total as u64 * 60_000);
        }
        stats
    }

    /// Length of the leading run of emergencies.
    pub fn emergency_count(&self) -> usize {
        self.entries.iter().take_while(|e| e.is_emergency).count()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches_name(name))
    }
}
