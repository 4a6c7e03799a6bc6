//! The memo record and its write-boundary validation.

use crate::error::{MemoError, MemoResult};
use chrono::{DateTime, NaiveDate};
use memoreg_files::Attachment;
use memoreg_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier of a memo.
///
/// Freshly minted identifiers are UUIDv4 in simple form (32 lowercase hex
/// characters). Identifiers loaded from an existing snapshot are kept
/// verbatim, whatever scheme minted them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(String);

impl MemoId {
    /// Mints a fresh identifier.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MemoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MemoId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One administrative record.
///
/// Serialized field names match the persisted snapshot layout. The three
/// attachment fields are set or unset together; a memo that never carried a
/// document serializes without them entirely. They are private so that
/// invariant cannot be broken piecemeal; use [`Memo::attachment`] to read
/// the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    pub memo_number: String,
    /// Calendar date as an ISO date string. Values that fail to parse are
    /// tolerated in storage; the query and aggregation engines degrade per
    /// their own rules.
    pub date: String,
    pub teacher: String,
    pub subject: String,
    /// Name of the department this memo belongs to. Not re-validated against
    /// the department set after save, so a later rename or removal leaves a
    /// stale value that is rendered as-is.
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_type: Option<String>,
}

impl Memo {
    /// The memo's calendar date, if the stored string parses.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// The attached document, if one is stored.
    ///
    /// A record where the attachment fields are incomplete (possible only in
    /// a hand-edited snapshot) reads as having no attachment.
    pub fn attachment(&self) -> Option<Attachment> {
        let (Some(data_uri), Some(name), Some(media_type)) =
            (&self.file_data, &self.file_name, &self.file_type)
        else {
            return None;
        };
        let file_name = NonEmptyText::new(name).ok()?;
        Some(Attachment {
            file_name,
            media_type: media_type.clone(),
            data_uri: data_uri.clone(),
        })
    }

    /// Whether the memo carries a document.
    pub fn has_attachment(&self) -> bool {
        self.attachment().is_some()
    }

    pub(crate) fn set_attachment(&mut self, attachment: Option<Attachment>) {
        match attachment {
            Some(attachment) => {
                self.file_data = Some(attachment.data_uri);
                self.file_type = Some(attachment.media_type);
                self.file_name = Some(attachment.file_name.into_string());
            }
            None => {
                self.file_data = None;
                self.file_name = None;
                self.file_type = None;
            }
        }
    }
}

/// Parses a stored date string. Plain ISO dates are the written form;
/// RFC 3339 timestamps are accepted for snapshots written by other tools.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Caller-supplied fields for a save.
///
/// Validation happens here, at the write boundary, not in the storage layer:
/// every field must be non-blank or the save is rejected before any state
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoDraft {
    pub memo_number: String,
    pub date: String,
    pub teacher: String,
    pub subject: String,
    pub department: String,
}

impl MemoDraft {
    /// Checks that every required field is present.
    pub fn validate(&self) -> MemoResult<()> {
        require("memoNumber", &self.memo_number)?;
        require("date", &self.date)?;
        require("teacher", &self.teacher)?;
        require("subject", &self.subject)?;
        require("department", &self.department)?;
        Ok(())
    }

    pub(crate) fn into_memo(self, id: MemoId, attachment: Option<Attachment>) -> Memo {
        let mut memo = Memo {
            id,
            memo_number: self.memo_number,
            date: self.date,
            teacher: self.teacher,
            subject: self.subject,
            department: self.department,
            file_data: None,
            file_name: None,
            file_type: None,
        };
        memo.set_attachment(attachment);
        memo
    }
}

fn require(field: &'static str, value: &str) -> MemoResult<()> {
    if value.trim().is_empty() {
        return Err(MemoError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MemoDraft {
        MemoDraft {
            memo_number: "ศธ 04/2567".into(),
            date: "2024-01-05".into(),
            teacher: "ครูสมชาย".into(),
            subject: "ขออนุมัติจัดซื้อ".into(),
            department: "งานบริหารงบประมาณ".into(),
        }
    }

    #[test]
    fn minted_ids_are_canonical_and_unique() {
        let a = MemoId::new();
        let b = MemoId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn legacy_ids_round_trip_verbatim() {
        let id = MemoId::from("memo_1712345678901");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"memo_1712345678901\"");
        let back: MemoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn validate_reports_each_missing_field() {
        assert!(draft().validate().is_ok());

        let mut d = draft();
        d.memo_number.clear();
        assert!(matches!(
            d.validate(),
            Err(MemoError::MissingField("memoNumber"))
        ));

        let mut d = draft();
        d.date = "   ".into();
        assert!(matches!(d.validate(), Err(MemoError::MissingField("date"))));

        let mut d = draft();
        d.teacher.clear();
        assert!(matches!(
            d.validate(),
            Err(MemoError::MissingField("teacher"))
        ));

        let mut d = draft();
        d.subject.clear();
        assert!(matches!(
            d.validate(),
            Err(MemoError::MissingField("subject"))
        ));

        let mut d = draft();
        d.department.clear();
        assert!(matches!(
            d.validate(),
            Err(MemoError::MissingField("department"))
        ));
    }

    #[test]
    fn memo_serializes_with_snapshot_field_names() {
        let memo = draft().into_memo(MemoId::from("memo_1"), None);
        let json = serde_json::to_value(&memo).unwrap();
        assert_eq!(json["memoNumber"], "ศธ 04/2567");
        assert_eq!(json["id"], "memo_1");
        // No attachment keys at all on a memo without a document.
        assert!(json.get("fileData").is_none());
        assert!(json.get("fileName").is_none());
        assert!(json.get("fileType").is_none());
    }

    #[test]
    fn attachment_fields_sit_directly_on_the_memo_object() {
        let attachment = Attachment::from_bytes("doc.pdf", b"%PDF-1.4").unwrap();
        let memo = draft().into_memo(MemoId::new(), Some(attachment.clone()));
        let json = serde_json::to_value(&memo).unwrap();
        assert_eq!(json["fileName"], "doc.pdf");
        assert_eq!(json["fileType"], "application/pdf");
        assert!(json["fileData"].as_str().unwrap().starts_with("data:"));

        let back: Memo = serde_json::from_value(json).unwrap();
        assert_eq!(back, memo);
        assert_eq!(back.attachment(), Some(attachment));
    }

    #[test]
    fn memo_without_attachment_keys_loads_as_none() {
        let raw = r#"{
            "id": "memo_1712345678901",
            "memoNumber": "001/2567",
            "date": "2024-02-10",
            "teacher": "ครูสมหญิง",
            "subject": "ขอใช้สถานที่",
            "department": "งานบริหารทั่วไป"
        }"#;
        let memo: Memo = serde_json::from_str(raw).unwrap();
        assert!(memo.attachment().is_none());
        assert!(!memo.has_attachment());
    }

    #[test]
    fn incomplete_attachment_fields_read_as_none() {
        let raw = r#"{
            "id": "m1",
            "memoNumber": "001",
            "date": "2024-02-10",
            "teacher": "t",
            "subject": "s",
            "department": "d",
            "fileName": "doc.pdf"
        }"#;
        let memo: Memo = serde_json::from_str(raw).unwrap();
        assert!(memo.attachment().is_none());
    }

    #[test]
    fn calendar_date_parses_iso_and_rfc3339() {
        let mut memo = draft().into_memo(MemoId::new(), None);
        assert_eq!(memo.calendar_date(), NaiveDate::from_ymd_opt(2024, 1, 5));

        memo.date = "2024-02-10T08:30:00+07:00".into();
        assert_eq!(memo.calendar_date(), NaiveDate::from_ymd_opt(2024, 2, 10));

        memo.date = "not a date".into();
        assert_eq!(memo.calendar_date(), None);
    }
}
