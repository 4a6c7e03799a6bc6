//! Inline document attachments.

use crate::AttachmentError;
use base64::{engine::general_purpose, Engine as _};
use memoreg_types::NonEmptyText;
use std::fs;
use std::path::{Path, PathBuf};

/// Media type recorded when detection finds nothing better.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Characters of the file name shown in list displays before truncation.
const DISPLAY_NAME_LIMIT: usize = 15;

/// A document encoded inline with its memo.
///
/// The three fields are always set together. Serialized field names match
/// the persisted snapshot layout, where they sit flattened inside the memo
/// object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Original file name, stored in full.
    #[serde(rename = "fileName")]
    pub file_name: NonEmptyText,

    /// Detected media type. Duplicates the MIME type inside the data URI
    /// for convenience.
    #[serde(rename = "fileType")]
    pub media_type: String,

    /// Full document content as `data:<mime-type>;base64,<payload>`.
    #[serde(rename = "fileData")]
    pub data_uri: String,
}

impl Attachment {
    /// Encodes the file at `source_path`.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError` if the path has no file name component or
    /// the file cannot be read. Nothing is partially encoded on failure.
    pub fn from_path(source_path: &Path) -> Result<Self, AttachmentError> {
        let file_name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AttachmentError::NamelessPath(source_path.display().to_string()))?;

        let bytes = fs::read(source_path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "failed to read attachment {}: {}",
                    source_path.display(),
                    e
                ),
            )
        })?;

        Self::from_bytes(file_name, &bytes)
    }

    /// Encodes in-memory bytes under the given file name.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError` if `file_name` is blank.
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Result<Self, AttachmentError> {
        let file_name = NonEmptyText::new(file_name)?;
        let media_type = infer::get(bytes)
            .map(|kind| kind.mime_type().to_owned())
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_owned());
        let data_uri = format!(
            "data:{};base64,{}",
            media_type,
            general_purpose::STANDARD.encode(bytes)
        );

        Ok(Self {
            file_name,
            media_type,
            data_uri,
        })
    }

    /// Decodes the data URI back into the original bytes.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError` if the payload is not a data URI or its
    /// base64 body is invalid.
    pub fn decode(&self) -> Result<Vec<u8>, AttachmentError> {
        let payload = self
            .data_uri
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .ok_or(AttachmentError::NotADataUri)?;
        Ok(general_purpose::STANDARD.decode(payload)?)
    }

    /// File name shortened for list display. Names longer than the display
    /// limit are cut and suffixed with an ellipsis; the stored name is
    /// untouched.
    pub fn display_name(&self) -> String {
        let mut chars = self.file_name.as_str().chars();
        let prefix: String = chars.by_ref().take(DISPLAY_NAME_LIMIT).collect();
        if chars.next().is_some() {
            format!("{prefix}...")
        } else {
            prefix
        }
    }
}

/// Where the bytes of a new attachment come from.
///
/// Saves accept an optional source; encoding happens inside the save so a
/// codec or I/O failure aborts the whole operation.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// A file on disk.
    Path(PathBuf),
    /// Bytes already in memory, with the name they should carry.
    Bytes { file_name: String, bytes: Vec<u8> },
}

impl AttachmentSource {
    /// Encodes the source into an [`Attachment`].
    pub fn encode(self) -> Result<Attachment, AttachmentError> {
        match self {
            Self::Path(path) => Attachment::from_path(&path),
            Self::Bytes { file_name, bytes } => Attachment::from_bytes(&file_name, &bytes),
        }
    }
}
