//! The memo repository.
//!
//! Owns the canonical memo list and the department name set, and is the sole
//! writer of their two store keys. Both collections are loaded once at
//! construction; every mutation rewrites the affected collection as a whole
//! snapshot. There is no incremental persistence.
//!
//! ## Write discipline
//!
//! All mutations take `&mut self`, so an in-flight save holds the exclusive
//! borrow of the repository. That borrow is the caller-visible busy state:
//! no other operation can observe the collection mid-save, and there is no
//! locking because there is no parallel mutation path. An in-flight
//! attachment encoding cannot be cancelled; once it completes, the record
//! commits.
//!
//! ## Failure behavior
//!
//! Validation and attachment encoding run before any state changes, so a
//! rejected or failed save leaves both the in-memory collection and the
//! persisted snapshot untouched. Persistence failures after a successful
//! mutation are logged by the store and do not roll the mutation back; the
//! in-memory collection stays authoritative for the session.

use crate::config::CoreConfig;
use crate::constants::{seed_departments, DEPARTMENTS_KEY, MEMOS_KEY};
use crate::error::{MemoError, MemoResult};
use crate::memo::{Memo, MemoDraft, MemoId};
use memoreg_files::AttachmentSource;
use memoreg_store::{FileMedium, StorageMedium, Store};
use memoreg_types::NonEmptyText;

/// Proof that a destructive delete was explicitly confirmed.
///
/// Obtained from [`MemoRepository::request_delete`] and consumed by
/// [`MemoRepository::confirm_delete`]. Dropping it cancels the delete. The
/// token cannot be cloned or constructed by callers, so a delete cannot
/// bypass the confirmation step.
#[derive(Debug)]
pub struct DeleteConfirmation {
    id: MemoId,
}

impl DeleteConfirmation {
    /// The memo this confirmation would delete.
    pub fn id(&self) -> &MemoId {
        &self.id
    }
}

/// Repository of memo records and department names.
pub struct MemoRepository<M: StorageMedium> {
    store: Store<M>,
    memos: Vec<Memo>,
    departments: Vec<NonEmptyText>,
}

impl MemoRepository<FileMedium> {
    /// Opens the repository over the file-backed store of `config`.
    pub fn open_at(config: &CoreConfig) -> Self {
        Self::open(config.open_store())
    }
}

impl<M: StorageMedium> MemoRepository<M> {
    /// Opens the repository, loading both collections from the store.
    ///
    /// A missing or unreadable memo snapshot yields an empty list; a missing
    /// or unreadable department snapshot yields the seeded set.
    pub fn open(store: Store<M>) -> Self {
        let memos: Vec<Memo> = store.get_or(MEMOS_KEY, Vec::new());
        let departments: Vec<NonEmptyText> = store.get_or(DEPARTMENTS_KEY, seed_departments());
        Self {
            store,
            memos,
            departments,
        }
    }

    /// The full memo collection, in insertion order.
    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    /// The known department names, in insertion order.
    pub fn departments(&self) -> &[NonEmptyText] {
        &self.departments
    }

    /// Distinct teacher names across all memos, in first-appearance order.
    pub fn teachers(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for memo in &self.memos {
            if !seen.iter().any(|t| t == &memo.teacher) {
                seen.push(memo.teacher.clone());
            }
        }
        seen
    }

    /// Appends a new memo.
    ///
    /// The draft is validated first; if an attachment source is supplied it
    /// is encoded next. Only when both succeed is a memo with a freshly
    /// minted id appended and the collection persisted.
    ///
    /// # Errors
    ///
    /// Returns `MemoError::MissingField` when a required field is blank and
    /// `MemoError::Attachment` when encoding fails. Neither leaves a partial
    /// record anywhere.
    pub fn add(
        &mut self,
        draft: MemoDraft,
        file: Option<AttachmentSource>,
    ) -> MemoResult<MemoId> {
        draft.validate()?;
        let attachment = file.map(AttachmentSource::encode).transpose()?;

        let id = MemoId::new();
        self.memos.push(draft.into_memo(id.clone(), attachment));
        self.persist_memos();
        Ok(id)
    }

    /// Replaces the memo with the matching id.
    ///
    /// A supplied attachment source replaces the stored attachment. With no
    /// source, the previous record's attachment is carried forward
    /// unchanged, so editing a memo never silently drops its document.
    ///
    /// # Errors
    ///
    /// Returns `MemoError::NotFound` when no memo has the given id, plus the
    /// same validation and encoding errors as [`MemoRepository::add`]. All
    /// of them leave the collection untouched.
    pub fn update(
        &mut self,
        id: &MemoId,
        draft: MemoDraft,
        file: Option<AttachmentSource>,
    ) -> MemoResult<()> {
        draft.validate()?;
        let index = self
            .memos
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| MemoError::NotFound(id.clone()))?;
        let encoded = file.map(AttachmentSource::encode).transpose()?;

        let attachment = encoded.or_else(|| self.memos[index].attachment());
        self.memos[index] = draft.into_memo(id.clone(), attachment);
        self.persist_memos();
        Ok(())
    }

    /// First step of the two-step delete: produces a confirmation token for
    /// the caller's dialog surface. No state changes.
    pub fn request_delete(&self, id: &MemoId) -> DeleteConfirmation {
        DeleteConfirmation { id: id.clone() }
    }

    /// Second step of the two-step delete: removes the confirmed memo.
    ///
    /// Idempotent. Confirming a delete for an id that no longer exists
    /// leaves the collection unchanged and is not an error.
    pub fn confirm_delete(&mut self, confirmation: DeleteConfirmation) {
        self.memos.retain(|m| m.id != confirmation.id);
        self.persist_memos();
    }

    /// Adds a department name to the set.
    ///
    /// Blank and already-present names are ignored, so the set stays unique.
    /// Departments are never renamed or removed.
    pub fn add_department(&mut self, name: &str) {
        let Ok(name) = NonEmptyText::new(name) else {
            return;
        };
        if self.departments.contains(&name) {
            return;
        }
        self.departments.push(name);
        self.persist_departments();
    }

    fn persist_memos(&self) {
        self.store.set(MEMOS_KEY, &self.memos);
    }

    fn persist_departments(&self) {
        self.store.set(DEPARTMENTS_KEY, &self.departments);
    }
}
