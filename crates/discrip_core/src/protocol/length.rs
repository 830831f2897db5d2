//! `H:MM:SS` title length conversion.

use super::record::{ProtocolError, ProtocolResult};

/// Parse an `H:MM:SS` length into total seconds.
///
/// Surrounding quotes and whitespace are ignored. Hours are unbounded up to
/// what fits in `u64` seconds; minutes and seconds must be below 60.
pub fn parse_hms(text: &str) -> ProtocolResult<u64> {
    let cleaned = text.replace('"', "");
    let cleaned = cleaned.trim();
    let invalid = || ProtocolError::InvalidLength(cleaned.to_string());

    let parts: Vec<&str> = cleaned.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let component = |raw: &str| raw.trim().parse::<u64>().map_err(|_| invalid());
    let hours = component(*hours)?;
    let minutes = component(*minutes)?;
    let seconds = component(*seconds)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)
}

/// Format seconds as `H:MM:SS`, the form MakeMKV reports.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
