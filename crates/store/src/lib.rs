//! Memoreg Persistent Store
//!
//! Generic named-value persistence for the memo registry. A [`Store`] keeps
//! one JSON-serialized value per key on a pluggable [`StorageMedium`] and
//! exposes exactly two operations:
//!
//! - [`Store::get_or`]: read a value, falling back to a caller-supplied
//!   default when the key is absent, unreadable, or unparseable. Never fails.
//! - [`Store::set`]: serialize and write a value. Failures are logged and
//!   swallowed; the in-memory value the caller holds remains the source of
//!   truth for the session.
//!
//! The store knows nothing about memos or departments. Swapping the medium
//! (a directory of files, an in-memory map, an embedded database) changes no
//! caller code.
//!
//! Persisted payloads are wrapped in a schema-versioned envelope so future
//! layout changes can migrate instead of guessing. Payloads written before
//! envelopes existed are still accepted as version zero.

mod medium;
mod store;

pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use store::{Store, SCHEMA_VERSION};

/// Errors a storage medium can report.
///
/// Callers of [`Store`] never see these; the store logs and recovers. They
/// exist so media implementations can report failures precisely.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key contains characters the medium cannot store safely.
    #[error("invalid store key: {0}")]
    InvalidKey(String),

    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
