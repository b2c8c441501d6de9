//! Document Store Layer
//!
//! The committed form document is owned by the surrounding host, not by this
//! engine. The [`FormStore`] trait is the seam between the two: the engine
//! reads the document fresh immediately before acting and commits whole new
//! values, never editing in place.
//!
//! - `FormStore` - External state-store contract (read + commit)
//! - `MemoryFormStore` - In-process reference implementation
//! - `FormEvent` - Notifications broadcast after commits and validation

use crate::models::FieldPath;
use serde_json::Value;
use thiserror::Error;

pub mod events;
mod memory;

pub use events::FormEvent;
pub use memory::MemoryFormStore;

/// Errors raised by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A value could not be committed at the requested path.
    #[error("Commit failed at '{path}': {reason}")]
    CommitFailed { path: String, reason: String },
}

/// External collaborator owning the committed form document.
///
/// Implementations must hand out a consistent snapshot from [`document`] and
/// apply [`commit`] atomically with respect to concurrent readers: the
/// engine re-reads the document right after committing and validation must
/// observe the new value.
///
/// [`document`]: FormStore::document
/// [`commit`]: FormStore::commit
pub trait FormStore: Send + Sync {
    /// Current committed document.
    ///
    /// A `null` document means the store was never populated; the service
    /// layer treats every path as having no previous value in that case.
    fn document(&self) -> Value;

    /// Set the document at `path` to `value`. The root path replaces the
    /// whole document.
    fn commit(&self, path: &FieldPath, value: Value) -> Result<(), StoreError>;
}
