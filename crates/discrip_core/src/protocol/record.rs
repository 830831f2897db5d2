//! Decoded status records and protocol errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a status line, derived from its leading tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// `TCOUNT` - total title count.
    TotalCount,
    /// `TINFO` - title attribute.
    TitleInfo,
    /// `SINFO` - stream attribute.
    StreamInfo,
    /// `CINFO` - disc attribute.
    ChapterInfo,
    /// `MSG` - human-readable message.
    Message,
    /// Anything else (`DRV`, `PRGV`, `PRGC`, junk).
    Other,
}

impl RecordKind {
    /// Map a leading tag to its kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TCOUNT" => RecordKind::TotalCount,
            "TINFO" => RecordKind::TitleInfo,
            "SINFO" => RecordKind::StreamInfo,
            "CINFO" => RecordKind::ChapterInfo,
            "MSG" => RecordKind::Message,
            _ => RecordKind::Other,
        }
    }

    /// The protocol tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::TotalCount => "TCOUNT",
            RecordKind::TitleInfo => "TINFO",
            RecordKind::StreamInfo => "SINFO",
            RecordKind::ChapterInfo => "CINFO",
            RecordKind::Message => "MSG",
            RecordKind::Other => "",
        }
    }
}

/// One decoded protocol line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Record kind.
    pub kind: RecordKind,
    /// Title index this record pertains to. Carries the count for `TCOUNT`
    /// and the message code for `MSG`.
    pub track_index: u32,
    /// Sub-field selector (second field), absent for single-field lines.
    pub field_code: Option<u32>,
    /// All fields after the tag, unquoted and trimmed. Index 0 is the
    /// track index field.
    pub values: Vec<String>,
}

impl StatusRecord {
    /// A record for a line with an unrecognized tag.
    pub fn other() -> Self {
        Self {
            kind: RecordKind::Other,
            track_index: 0,
            field_code: None,
            values: Vec::new(),
        }
    }

    /// Field value at `index`, if present.
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Field value at `index`, or a [`ProtocolError::MissingField`].
    pub fn required(&self, index: usize) -> ProtocolResult<&str> {
        self.value(index).ok_or(ProtocolError::MissingField {
            tag: self.kind.tag(),
            index,
        })
    }
}

/// A single malformed status line.
///
/// Always recoverable: the line is skipped and decoding continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("{tag} field {index} is not an integer: '{value}'")]
    InvalidInteger {
        tag: &'static str,
        index: usize,
        value: String,
    },

    #[error("{tag} line is missing field {index}")]
    MissingField { tag: &'static str, index: usize },

    #[error("invalid title length '{0}', expected H:MM:SS")]
    InvalidLength(String),

    #[error("invalid frame rate '{0}'")]
    InvalidFrameRate(String),
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_map_to_other() {
        assert_eq!(RecordKind::from_tag("TINFO"), RecordKind::TitleInfo);
        assert_eq!(RecordKind::from_tag("DRV"), RecordKind::Other);
        assert_eq!(RecordKind::from_tag("tinfo"), RecordKind::Other);
    }

    #[test]
    fn required_reports_missing_index() {
        let record = StatusRecord {
            kind: RecordKind::TitleInfo,
            track_index: 1,
            field_code: Some(9),
            values: vec!["1".into(), "9".into()],
        };
        assert_eq!(
            record.required(3),
            Err(ProtocolError::MissingField {
                tag: "TINFO",
                index: 3
            })
        );
    }
}
