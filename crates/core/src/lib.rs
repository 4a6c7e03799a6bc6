//! # Memoreg Core
//!
//! Core business logic for the Memoreg memo registry: the record model, the
//! repository that owns the persisted collections, and the pure query and
//! aggregation engines the list and dashboard views are built from.
//!
//! This crate contains data operations only. Rendering, file pickers,
//! confirmation dialogs, chart drawing, and localization strings belong to
//! the embedding application; it calls in here and presents the results.
//!
//! The typical control flow is:
//!
//! 1. open a [`MemoRepository`] over a [`memoreg_store::Store`]
//! 2. run [`query::run_default`] over [`MemoRepository::memos`] with the
//!    user's filter, sort, and page state
//! 3. feed the same filtered list to [`stats::dashboard`] and
//!    [`stats::time_bucket_counts`] for the dashboard and charts
//! 4. apply user edits through the repository, which persists each change
//!    as a whole-collection snapshot

pub mod config;
pub mod constants;
pub mod datefmt;
pub mod error;
pub mod memo;
pub mod query;
pub mod repository;
pub mod stats;

pub use config::CoreConfig;
pub use error::{MemoError, MemoResult};
pub use memo::{Memo, MemoDraft, MemoId};
pub use query::{MemoFilter, QueryPage, SortKey, SortOrder, SortSpec};
pub use repository::{DeleteConfirmation, MemoRepository};
pub use stats::{DashboardStats, TimeBucket};

// The attachment types travel through the repository API, so re-export them
// for hosts that only depend on this crate.
pub use memoreg_files::{Attachment, AttachmentError, AttachmentSource};
