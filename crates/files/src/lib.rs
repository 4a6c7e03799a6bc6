//! Memoreg attachment encoding
//!
//! Memos can carry one attached document. The registry stores no binary
//! files: the document travels inline with its memo as a data URI string
//! (`data:<mime-type>;base64,<payload>`), which survives any text-only
//! persistence medium.
//!
//! This crate owns that encoding:
//!
//! - the bytes are read and base64-encoded in one step, so a failed read
//!   never produces a half-attached document
//! - the media type is detected from the bytes (best effort) and stored
//!   alongside the payload for convenience
//! - the original file name is stored in full; a truncated form for list
//!   display is derived on demand
//!
//! ## Example
//!
//! ```no_run
//! use memoreg_files::Attachment;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let attachment = Attachment::from_path(Path::new("report.pdf"))?;
//! assert!(attachment.data_uri.starts_with("data:"));
//! # Ok(())
//! # }
//! ```

mod attachment;

pub use attachment::{Attachment, AttachmentSource, FALLBACK_MEDIA_TYPE};

/// Errors that can occur while encoding or decoding an attachment.
#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// The source had no usable file name.
    #[error("invalid attachment file name: {0}")]
    FileName(#[from] memoreg_types::TextError),

    /// The source path had no file name component.
    #[error("attachment path has no file name: {0}")]
    NamelessPath(String),

    /// Reading the source bytes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored payload is not a data URI.
    #[error("attachment payload is not a data URI")]
    NotADataUri,

    /// The stored payload is a data URI but its body is not valid base64.
    #[error("failed to decode attachment payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
