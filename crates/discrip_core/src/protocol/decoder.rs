//! Line decoder for the MakeMKV robot-mode protocol.

use super::record::{ProtocolError, ProtocolResult, RecordKind, StatusRecord};

/// Decode one status line.
///
/// Lines whose tag is not one of `MSG`, `TCOUNT`, `CINFO`, `TINFO`,
/// `SINFO` decode to a [`RecordKind::Other`] record, as do recognized
/// lines with fewer than two fields (except `TCOUNT`, whose only field
/// is the count).
///
/// # Errors
/// Returns [`ProtocolError::InvalidInteger`] when the track index or
/// field code of a recognized line is not a non-negative integer.
pub fn decode_line(line: &str) -> ProtocolResult<StatusRecord> {
    let Some((tag, rest)) = line.split_once(':') else {
        return Ok(StatusRecord::other());
    };

    let kind = RecordKind::from_tag(tag.trim());
    if kind == RecordKind::Other {
        return Ok(StatusRecord::other());
    }

    let values = split_fields(rest);
    if values.len() < 2 && kind != RecordKind::TotalCount {
        return Ok(StatusRecord::other());
    }

    let track_index = parse_field(kind, 0, &values[0])?;
    let field_code = match values.get(1) {
        Some(raw) => Some(parse_field(kind, 1, raw)?),
        None => None,
    };

    Ok(StatusRecord {
        kind,
        track_index,
        field_code,
        values,
    })
}

/// Split the payload of a line on commas, keeping commas inside
/// double-quoted fields. Quotes are stripped and fields trimmed.
pub(crate) fn split_fields(rest: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in rest.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(finish_field(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(finish_field(&mut current));

    fields
}

fn finish_field(current: &mut String) -> String {
    let field = current.trim().to_string();
    current.clear();
    field
}

fn parse_field(kind: RecordKind, index: usize, raw: &str) -> ProtocolResult<u32> {
    raw.parse().map_err(|_| ProtocolError::InvalidInteger {
        tag: kind.tag(),
        index,
        value: raw.to_string(),
    })
}
