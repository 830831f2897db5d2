//! Track catalog entries.

use serde::{Deserialize, Serialize};

/// Source tag recorded on every track produced from MakeMKV output.
pub const SOURCE_LABEL: &str = "MakeMKV";

/// Metadata for one disc title, as accumulated from `TINFO`/`SINFO` lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Title index reported by MakeMKV.
    pub track_number: u32,
    /// Title length in seconds.
    pub length_seconds: u64,
    /// Display aspect ratio (e.g. "16:9"), empty if unknown.
    #[serde(default)]
    pub aspect_ratio: String,
    /// Frame rate, 0.0 if unknown.
    #[serde(default)]
    pub fps: f64,
    /// Output file name MakeMKV will use, empty if unknown.
    #[serde(default)]
    pub filename: String,
    /// Tool that produced this descriptor.
    pub source: String,
}

impl TrackDescriptor {
    /// Create a descriptor tagged with [`SOURCE_LABEL`].
    pub fn new(
        track_number: u32,
        length_seconds: u64,
        aspect_ratio: impl Into<String>,
        fps: f64,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            track_number,
            length_seconds,
            aspect_ratio: aspect_ratio.into(),
            fps,
            filename: filename.into(),
            source: SOURCE_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tags_source() {
        let track = TrackDescriptor::new(3, 5400, "16:9", 23.976, "title_t03.mkv");
        assert_eq!(track.source, "MakeMKV");
        assert_eq!(track.track_number, 3);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"track_number":1,"length_seconds":60,"source":"MakeMKV"}"#;
        let track: TrackDescriptor = serde_json::from_str(json).unwrap();
        assert!(track.aspect_ratio.is_empty());
        assert!(track.filename.is_empty());
        assert_eq!(track.fps, 0.0);
    }
}
