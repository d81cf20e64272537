//! Clinic Queue Core Library
//!
//! In-memory walk-in patient queue with emergency priority.
//!
//! # Architecture
//!
//! ```text
//!   Receptionist form ──► intake::Registration::validate
//!                                   │
//!                                   ▼
//!                      ┌────────────────────────────┐
//!                      │        PriorityQueue       │
//!                      │ [ emergencies ][ normals ] │
//!                      └─────────────┬──────────────┘
//!                                    │
//!            ┌───────────────┬───────┴───────┬──────────────┐
//!            ▼               ▼               ▼              ▼
//!        call_next     cancel / find     snapshot         stats
//!                            │
//!                            ▼
//!                  estimate::WaitReport
//! ```
//!
//! # Core Principle
//!
//! **Emergencies are always seen first.** Within each tier, patients are seen
//! in arrival order.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Entry, Specialty, EntryView, QueueStats)
//! - [`queue`]: The two-tier FIFO queue
//! - [`intake`]: Registration form validation
//! - [`estimate`]: Remaining-wait estimates and front-desk configuration

pub mod estimate;
pub mod intake;
pub mod models;
pub mod queue;

// Re-export commonly used types
pub use estimate::{estimated_remaining_minutes, QueueConfig, WaitReport};
pub use intake::{Registration, ValidRegistration, ValidationError, ValidationErrors};
pub use models::{Entry, EntryKind, EntryView, Located, QueueStats, Specialty};
pub use queue::PriorityQueue;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicQueueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for ClinicQueueError {
    fn from(e: ValidationErrors) -> Self {
        ClinicQueueError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicQueueError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicQueueError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an empty queue for one front-desk session.
#[uniffi::export]
pub fn create_clinic_queue(consultation_minutes: u32) -> Arc<ClinicQueue> {
    Arc::new(ClinicQueue {
        queue: Mutex::new(PriorityQueue::new()),
        config: QueueConfig {
            consultation_minutes,
        },
    })
}

/// Specialty labels, in form order.
#[uniffi::export]
pub fn specialties() -> Vec<String> {
    Specialty::ALL
        .iter()
        .map(|s| s.label().to_string())
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe queue wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicQueue {
    queue: Mutex<PriorityQueue>,
    config: QueueConfig,
}

#[uniffi::export]
impl ClinicQueue {
    /// Validate and register a patient.
    pub fn register(&self, registration: FfiRegistration) -> Result<FfiEntry, ClinicQueueError> {
        let valid = Registration::from(registration).validate()?;
        let mut queue = self.queue.lock()?;
        let entry = valid.enqueue(&mut queue);
        Ok(entry.into())
    }

    /// Call the next patient, if any.
    pub fn call_next(&self) -> Result<Option<FfiEntry>, ClinicQueueError> {
        let mut queue = self.queue.lock()?;
        Ok(queue.call_next().as_ref().map(FfiEntry::from))
    }

    /// Patient who will be called next, without removing them.
    pub fn peek(&self) -> Result<Option<FfiEntry>, ClinicQueueError> {
        let queue = self.queue.lock()?;
        Ok(queue.peek().map(FfiEntry::from))
    }

    /// Cancel the first appointment under `name`.
    pub fn cancel(&self, name: String) -> Result<bool, ClinicQueueError> {
        let mut queue = self.queue.lock()?;
        Ok(queue.cancel(&name))
    }

    /// Position and wait estimate for the first patient under `name`.
    pub fn find(&self, name: String) -> Result<Option<FfiWaitReport>, ClinicQueueError> {
        let queue = self.queue.lock()?;
        let report = WaitReport::for_patient(&queue, &name, &self.config, chrono::Utc::now());
        Ok(report.map(|r| r.into()))
    }

    /// Board rows in consultation order.
    pub fn snapshot(&self) -> Result<Vec<FfiEntryView>, ClinicQueueError> {
        let queue = self.queue.lock()?;
        Ok(queue.snapshot().into_iter().map(|v| v.into()).collect())
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> Result<FfiQueueStats, ClinicQueueError> {
        let queue = self.queue.lock()?;
        Ok(queue.stats().into())
    }

    pub fn consultation_minutes(&self) -> u32 {
        self.config.consultation_minutes
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRegistration {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub specialty: String,
    pub is_emergency: bool,
}

impl From<FfiRegistration> for Registration {
    fn from(reg: FfiRegistration) -> Self {
        Registration {
            name: reg.name,
            phone: reg.phone,
            date: reg.date,
            time: reg.time,
            specialty: reg.specialty,
            is_emergency: reg.is_emergency,
        }
    }
}

/// FFI-safe queue entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEntry {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub specialty: String,
    pub kind: String,
    pub registered_at: String,
}

impl From<&Entry> for FfiEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            phone: entry.phone.clone(),
            date: entry.date.clone(),
            time: entry.time.clone(),
            specialty: entry.specialty.label().to_string(),
            kind: entry.kind().to_string(),
            registered_at: entry.registered_at.to_rfc3339(),
        }
    }
}

/// FFI-safe board row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEntryView {
    pub position: u32,
    pub id: String,
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub specialty: String,
    pub kind: String,
    pub wait_minutes: u64,
}

impl From<EntryView> for FfiEntryView {
    fn from(view: EntryView) -> Self {
        Self {
            position: ffi_count(view.position),
            id: view.id,
            name: view.name,
            phone: view.phone,
            date: view.date,
            time: view.time,
            specialty: view.specialty.label().to_string(),
            kind: view.kind.to_string(),
            wait_minutes: view.wait_minutes,
        }
    }
}

/// Counts and positions saturate at `u32::MAX` across the FFI boundary.
fn ffi_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// FFI-safe statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiQueueStats {
    pub total: u32,
    pub emergency_count: u32,
    pub normal_count: u32,
    pub average_wait_minutes: u64,
}

impl From<QueueStats> for FfiQueueStats {
    fn from(stats: QueueStats) -> Self {
        Self {
            total: ffi_count(stats.total),
            emergency_count: ffi_count(stats.emergency_count),
            normal_count: ffi_count(stats.normal_count),
            average_wait_minutes: stats.average_wait_minutes,
        }
    }
}

/// FFI-safe wait report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiWaitReport {
    pub name: String,
    pub position: u32,
    pub kind: String,
    pub specialty: String,
    pub waited_minutes: u64,
    pub estimated_remaining_minutes: u64,
}

impl From<WaitReport> for FfiWaitReport {
    fn from(report: WaitReport) -> Self {
        Self {
            name: report.name,
            position: ffi_count(report.position),
            kind: report.kind.to_string(),
            specialty: report.specialty.label().to_string(),
            waited_minutes: report.waited_minutes,
            estimated_remaining_minutes: report.estimated_remaining_minutes,
        }
    }
}
