//! Per-title length filter.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::RipSettings;
use crate::models::TrackDescriptor;

/// Decision for one title in per-track mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum TrackVerdict {
    TooShort,
    TooLong,
    /// Ripped; `output_path` is where MakeMKV writes the title.
    Selected { output_path: PathBuf },
}

impl TrackVerdict {
    pub fn is_selected(&self) -> bool {
        matches!(self, TrackVerdict::Selected { .. })
    }
}

/// Inclusive length window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPolicy {
    pub min_length: u64,
    pub max_length: u64,
}

impl LengthPolicy {
    pub fn new(min_length: u64, max_length: u64) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    pub fn from_settings(settings: &RipSettings) -> Self {
        Self::new(settings.min_length, settings.max_length)
    }

    /// Classify `track`. Both bounds are inclusive.
    pub fn classify(&self, track: &TrackDescriptor, raw_path: &Path) -> TrackVerdict {
        if track.length_seconds < self.min_length {
            TrackVerdict::TooShort
        } else if track.length_seconds > self.max_length {
            TrackVerdict::TooLong
        } else {
            TrackVerdict::Selected {
                output_path: raw_path.join(&track.filename),
            }
        }
    }
}

/// Outcome for one catalog entry, as reported after the rip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackResult {
    pub track_number: u32,
    pub length_seconds: u64,
    #[serde(flatten)]
    pub verdict: TrackVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(length: u64) -> TrackDescriptor {
        TrackDescriptor::new(1, length, "16:9", 23.976, "title_t01.mkv")
    }

    #[test]
    fn exactly_one_verdict_per_length() {
        let policy = LengthPolicy::new(600, 7200);
        let raw = Path::new("/raw/Movie");

        for length in [0, 599, 600, 601, 3600, 7199, 7200, 7201, 99999] {
            let verdict = policy.classify(&track(length), raw);
            let expected_selected = (600..=7200).contains(&length);
            assert_eq!(verdict.is_selected(), expected_selected, "length {length}");
            match verdict {
                TrackVerdict::TooShort => assert!(length < 600),
                TrackVerdict::TooLong => assert!(length > 7200),
                TrackVerdict::Selected { .. } => {}
            }
        }
    }

    #[test]
    fn selected_path_joins_filename() {
        let policy = LengthPolicy::new(0, 10_000);
        let verdict = policy.classify(&track(900), Path::new("/raw/Movie"));
        assert_eq!(
            verdict,
            TrackVerdict::Selected {
                output_path: PathBuf::from("/raw/Movie/title_t01.mkv")
            }
        );
    }

    #[test]
    fn result_serializes_flat() {
        let result = TrackResult {
            track_number: 2,
            length_seconds: 30,
            verdict: TrackVerdict::TooShort,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["verdict"], "too_short");
        assert_eq!(json["track_number"], 2);
    }
}
