//! Rip job data.

use serde::{Deserialize, Serialize};

use super::store::TrackStore;
use crate::models::{DiscType, TrackDescriptor};

/// One rip job against one drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RipJob {
    /// Device path of the drive (e.g. "/dev/sr0").
    pub device_path: String,
    /// Media type in the drive.
    pub disc_type: DiscType,
    /// Destination title name (used for the raw directory).
    pub title: String,
    /// Per-job stage token, used to disambiguate a colliding raw directory.
    pub stage: String,
    /// Title count reported by MakeMKV.
    #[serde(default)]
    pub title_count: Option<u32>,
    /// Track catalog populated by the track-info pass.
    #[serde(default)]
    pub tracks: Vec<TrackDescriptor>,
}

impl RipJob {
    /// Create a new job with an empty catalog.
    pub fn new(
        device_path: impl Into<String>,
        disc_type: DiscType,
        title: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            device_path: device_path.into(),
            disc_type,
            title: title.into(),
            stage: stage.into(),
            title_count: None,
            tracks: Vec::new(),
        }
    }

    /// Name used for the job's log file.
    pub fn job_name(&self) -> String {
        format!("{}_{}", self.title, self.stage)
    }

    /// Look up a track by title index.
    pub fn track(&self, track_number: u32) -> Option<&TrackDescriptor> {
        self.tracks.iter().find(|t| t.track_number == track_number)
    }
}

impl TrackStore for RipJob {
    fn register_track(&mut self, track: TrackDescriptor) {
        match self
            .tracks
            .iter_mut()
            .find(|t| t.track_number == track.track_number)
        {
            Some(existing) => *existing = track,
            None => self.tracks.push(track),
        }
    }

    fn set_title_count(&mut self, count: u32) {
        self.title_count = Some(count);
    }

    fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    fn title_count(&self) -> Option<u32> {
        self.title_count
    }
}
