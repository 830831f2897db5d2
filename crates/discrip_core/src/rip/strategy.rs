//! Rip strategy selection.

use std::fmt;

use serde::Serialize;

use crate::config::RipSettings;
use crate::models::{DiscType, RipMethod};

/// The one rip mode a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RipStrategy {
    /// Decrypted disc backup, no per-title filtering.
    Backup,
    /// One `mkv ... all` command; MakeMKV applies the minimum length.
    WholeDisc,
    /// One `mkv` command per title that passes the length filter.
    PerTrack,
}

impl RipStrategy {
    /// Whether the job needs the track catalog before ripping.
    pub fn needs_track_info(&self) -> bool {
        !matches!(self, RipStrategy::Backup)
    }
}

impl fmt::Display for RipStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RipStrategy::Backup => write!(f, "backup"),
            RipStrategy::WholeDisc => write!(f, "whole disc"),
            RipStrategy::PerTrack => write!(f, "per track"),
        }
    }
}

/// Pick the strategy for a disc.
///
/// Backup only applies to media that support it; any other disc falls back
/// to MKV ripping, where an unbounded maximum length selects the
/// whole-disc command.
pub fn select_strategy(settings: &RipSettings, disc_type: DiscType) -> RipStrategy {
    if settings.method == RipMethod::Backup && disc_type.supports_backup() {
        RipStrategy::Backup
    } else if settings.is_unbounded() {
        RipStrategy::WholeDisc
    } else {
        RipStrategy::PerTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(method: RipMethod, max_length: u64) -> RipSettings {
        RipSettings {
            method,
            max_length,
            ..RipSettings::default()
        }
    }

    #[test]
    fn backup_only_for_bluray() {
        let backup = settings(RipMethod::Backup, 99999);
        assert_eq!(select_strategy(&backup, DiscType::Bluray), RipStrategy::Backup);
        assert_eq!(select_strategy(&backup, DiscType::Dvd), RipStrategy::WholeDisc);

        let bounded_backup = settings(RipMethod::Backup, 3600);
        assert_eq!(select_strategy(&bounded_backup, DiscType::Dvd), RipStrategy::PerTrack);
    }

    #[test]
    fn max_length_sentinel_selects_whole_disc() {
        assert_eq!(
            select_strategy(&settings(RipMethod::Mkv, 99999), DiscType::Bluray),
            RipStrategy::WholeDisc
        );
        assert_eq!(
            select_strategy(&settings(RipMethod::Mkv, 99998), DiscType::Bluray),
            RipStrategy::PerTrack
        );
        assert_eq!(
            select_strategy(&settings(RipMethod::Mkv, 7200), DiscType::Dvd),
            RipStrategy::PerTrack
        );
    }

    #[test]
    fn track_info_needed_except_backup() {
        assert!(!RipStrategy::Backup.needs_track_info());
        assert!(RipStrategy::WholeDisc.needs_track_info());
        assert!(RipStrategy::PerTrack.needs_track_info());
    }
}
