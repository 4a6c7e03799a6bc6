use crate::memo::MemoId;

#[derive(Debug, thiserror::Error)]
pub enum MemoError {
    #[error("required field missing: {0}")]
    MissingField(&'static str),
    #[error("no memo found with id {0}")]
    NotFound(MemoId),
    #[error("failed to encode attachment: {0}")]
    Attachment(#[from] memoreg_files::AttachmentError),
}

impl MemoError {
    /// True for user-correctable input problems, as opposed to failures of
    /// the save itself. Hosts route these to a warning surface rather than
    /// an error surface.
    pub fn is_validation(&self) -> bool {
        matches!(self, MemoError::MissingField(_))
    }
}

pub type MemoResult<T> = std::result::Result<T, MemoError>;
