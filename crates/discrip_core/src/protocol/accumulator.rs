//! Fold decoded status records into a track catalog.
//!
//! MakeMKV reports title attributes as a flat stream of `TINFO`/`SINFO`
//! lines. The accumulator tracks the title currently being described and
//! finalizes it when a `TINFO` line for a different title arrives. The
//! last title has no such boundary, so callers must call
//! [`TrackAccumulator::finish`] once the stream ends.

use std::collections::HashSet;

use super::decoder::decode_line;
use super::length::parse_hms;
use super::record::{ProtocolError, ProtocolResult, RecordKind, StatusRecord};
use crate::jobs::TrackStore;
use crate::models::TrackDescriptor;

/// `TINFO` attribute id for the title duration.
const TITLE_LENGTH: u32 = 9;
/// `TINFO` attribute id for the output file name.
const TITLE_FILENAME: u32 = 27;
/// `SINFO` stream index of the primary (video) stream.
const PRIMARY_STREAM: u32 = 0;
/// `SINFO` attribute id for the aspect ratio.
const STREAM_ASPECT: u32 = 20;
/// `SINFO` attribute id for the frame rate.
const STREAM_FRAME_RATE: u32 = 21;

/// Something the accumulator hands to the track store.
#[derive(Debug, Clone, PartialEq)]
pub enum AccumulatorEvent {
    /// Total title count (`TCOUNT`).
    DiscSummary(u32),
    /// A title whose attributes are complete.
    TrackFinalized(TrackDescriptor),
}

/// Parsed value of one `TINFO` line, validated before any state changes.
enum TitleUpdate {
    Length(u64),
    Filename(String),
}

/// Running state across the lines of one `info` dump.
#[derive(Debug, Default)]
pub struct TrackAccumulator {
    current_track: u32,
    length_seconds: u64,
    aspect_ratio: String,
    fps: f64,
    filename: String,
    emitted: HashSet<u32>,
}

impl TrackAccumulator {
    /// Create an accumulator with no current track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Title index currently being built (0 = none yet).
    pub fn current_track(&self) -> u32 {
        self.current_track
    }

    /// Decode and apply one raw line.
    pub fn feed_line(&mut self, line: &str) -> ProtocolResult<Option<AccumulatorEvent>> {
        let record = decode_line(line)?;
        self.apply(&record)
    }

    /// Apply one decoded record.
    ///
    /// On error the record is ignored entirely and the state is unchanged.
    pub fn apply(&mut self, record: &StatusRecord) -> ProtocolResult<Option<AccumulatorEvent>> {
        match record.kind {
            RecordKind::TotalCount => Ok(Some(AccumulatorEvent::DiscSummary(record.track_index))),
            RecordKind::TitleInfo => self.apply_title_info(record),
            RecordKind::StreamInfo => {
                self.apply_stream_info(record)?;
                Ok(None)
            }
            RecordKind::Message => {
                tracing::debug!(
                    "MakeMKV message {}: {}",
                    record.track_index,
                    record.value(3).unwrap_or_default()
                );
                Ok(None)
            }
            RecordKind::ChapterInfo | RecordKind::Other => Ok(None),
        }
    }

    /// Finalize the last title. Consumes the accumulator so it runs once.
    pub fn finish(mut self) -> Option<TrackDescriptor> {
        self.finalize_current()
    }

    /// A `TINFO` line for a new title finalizes the previous one. The
    /// filename is cleared at that boundary so a title without its own
    /// attribute 27 reports an empty name instead of its predecessor's.
    fn apply_title_info(
        &mut self,
        record: &StatusRecord,
    ) -> ProtocolResult<Option<AccumulatorEvent>> {
        let update = match record.field_code {
            Some(TITLE_LENGTH) => Some(TitleUpdate::Length(parse_hms(record.required(3)?)?)),
            Some(TITLE_FILENAME) => Some(TitleUpdate::Filename(record.required(3)?.to_string())),
            _ => None,
        };

        let mut event = None;
        if record.track_index != self.current_track {
            event = self.finalize_current().map(AccumulatorEvent::TrackFinalized);
            self.current_track = record.track_index;
            // Length, aspect and fps carry over into the next title until
            // its own lines arrive. Only the filename is per-title.
            self.filename.clear();
        }

        match update {
            Some(TitleUpdate::Length(seconds)) => self.length_seconds = seconds,
            Some(TitleUpdate::Filename(name)) => self.filename = name,
            None => {}
        }

        Ok(event)
    }

    fn apply_stream_info(&mut self, record: &StatusRecord) -> ProtocolResult<()> {
        if record.field_code != Some(PRIMARY_STREAM) {
            return Ok(());
        }

        let attribute = record.value(2).and_then(|v| v.parse::<u32>().ok());
        match attribute {
            Some(STREAM_ASPECT) => {
                self.aspect_ratio = record.required(4)?.to_string();
            }
            Some(STREAM_FRAME_RATE) => {
                let raw = record.required(4)?;
                let number = raw.split_whitespace().next().unwrap_or_default();
                self.fps = number
                    .parse::<f64>()
                    .map_err(|_| ProtocolError::InvalidFrameRate(raw.to_string()))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn finalize_current(&mut self) -> Option<TrackDescriptor> {
        if self.current_track == 0 {
            return None;
        }
        if !self.emitted.insert(self.current_track) {
            tracing::warn!(
                "Title {} was already registered, ignoring repeated attributes",
                self.current_track
            );
            return None;
        }

        Some(TrackDescriptor::new(
            self.current_track,
            self.length_seconds,
            self.aspect_ratio.clone(),
            self.fps,
            self.filename.clone(),
        ))
    }
}

/// Outcome of building a catalog from a full `info` dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Title count from `TCOUNT`, if reported.
    pub title_count: Option<u32>,
    /// Tracks handed to the store.
    pub tracks_registered: usize,
    /// Malformed lines that were skipped.
    pub lines_skipped: usize,
}

/// Decode every line, accumulate titles, and register them with `store`.
///
/// Malformed lines are logged and skipped. The final title is flushed
/// after the last line.
pub fn catalog_from_lines<I, S>(lines: I, store: &mut S) -> CatalogSummary
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    S: TrackStore + ?Sized,
{
    let mut accumulator = TrackAccumulator::new();
    let mut summary = CatalogSummary::default();

    for line in lines {
        let line = line.as_ref();
        match accumulator.feed_line(line) {
            Ok(Some(AccumulatorEvent::DiscSummary(count))) => {
                tracing::info!("Found {} titles", count);
                store.set_title_count(count);
                summary.title_count = Some(count);
            }
            Ok(Some(AccumulatorEvent::TrackFinalized(track))) => {
                store.register_track(track);
                summary.tracks_registered += 1;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!("Skipping status line '{}': {}", line, e);
                summary.lines_skipped += 1;
            }
        }
    }

    if let Some(track) = accumulator.finish() {
        store.register_track(track);
        summary.tracks_registered += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::RipJob;
    use crate::models::DiscType;

    fn job() -> RipJob {
        RipJob::new("/dev/sr0", DiscType::Dvd, "Movie", "171")
    }

    #[test]
    fn catalog_scenario_with_flush() {
        let lines = [
            "TCOUNT:3",
            r#"TINFO:1,9,0,"0:12:30""#,
            r#"TINFO:1,27,0,"title1.mkv""#,
            r#"TINFO:2,9,0,"1:05:00""#,
        ];
        let mut job = job();
        let summary = catalog_from_lines(lines, &mut job);

        assert_eq!(summary.title_count, Some(3));
        assert_eq!(job.title_count, Some(3));
        assert_eq!(job.tracks.len(), 2);

        assert_eq!(job.tracks[0].track_number, 1);
        assert_eq!(job.tracks[0].length_seconds, 750);
        assert_eq!(job.tracks[0].filename, "title1.mkv");

        assert_eq!(job.tracks[1].track_number, 2);
        assert_eq!(job.tracks[1].length_seconds, 3900);
        assert_eq!(job.tracks[1].filename, "");
    }

    #[test]
    fn stream_attributes_apply_to_current_title() {
        let lines = [
            r#"TINFO:1,9,0,"1:30:00""#,
            r#"TINFO:1,27,0,"movie_t01.mkv""#,
            r#"SINFO:1,0,20,0,"16:9""#,
            r#"SINFO:1,0,21,0,"23.976 (24000/1001)""#,
            r#"SINFO:1,1,20,0,"4:3""#,
        ];
        let mut job = job();
        catalog_from_lines(lines, &mut job);

        let track = job.track(1).unwrap();
        assert_eq!(track.aspect_ratio, "16:9");
        assert!((track.fps - 23.976).abs() < 1e-9);
        assert_eq!(track.source, "MakeMKV");
    }

    #[test]
    fn length_aspect_and_fps_carry_over_between_titles() {
        // Title 2 has no length or SINFO lines of its own and inherits
        // title 1's values. Pinned as-is; see DESIGN.md.
        let lines = [
            r#"TINFO:1,9,0,"0:45:00""#,
            r#"SINFO:1,0,20,0,"16:9""#,
            r#"SINFO:1,0,21,0,"25""#,
            r#"TINFO:1,27,0,"a.mkv""#,
            r#"TINFO:2,8,0,"12""#,
        ];
        let mut job = job();
        catalog_from_lines(lines, &mut job);

        let second = job.track(2).unwrap();
        assert_eq!(second.length_seconds, 2700);
        assert_eq!(second.aspect_ratio, "16:9");
        assert_eq!(second.fps, 25.0);
        assert_eq!(second.filename, "");
    }

    #[test]
    fn oversized_length_line_is_skipped() {
        let lines = [
            r#"TINFO:1,9,0,"0:10:00""#,
            r#"TINFO:1,9,0,"10000000000000000:00:00""#,
            r#"TINFO:2,9,0,"0:20:00""#,
        ];
        let mut job = job();
        let summary = catalog_from_lines(lines, &mut job);

        assert_eq!(summary.lines_skipped, 1);
        assert_eq!(job.tracks.len(), 2);
        assert_eq!(job.track(1).unwrap().length_seconds, 600);
        assert_eq!(job.track(2).unwrap().length_seconds, 1200);
    }

    #[test]
    fn title_zero_is_never_emitted() {
        let lines = [
            r#"TINFO:0,9,0,"0:05:00""#,
            r#"TINFO:0,27,0,"title_t00.mkv""#,
            r#"TINFO:1,9,0,"0:10:00""#,
        ];
        let mut job = job();
        let summary = catalog_from_lines(lines, &mut job);

        assert_eq!(summary.tracks_registered, 1);
        assert_eq!(job.tracks[0].track_number, 1);
        assert_eq!(job.tracks[0].length_seconds, 600);
    }

    #[test]
    fn only_zero_title_emits_nothing() {
        let mut acc = TrackAccumulator::new();
        acc.feed_line(r#"TINFO:0,9,0,"0:05:00""#).unwrap();
        assert!(acc.finish().is_none());
    }

    #[test]
    fn malformed_lines_are_skipped_without_losing_the_rest() {
        let lines = [
            "TCOUNT:2",
            r#"TINFO:1,9,0,"0:20:00""#,
            r#"TINFO:1,9,0,"garbage""#,
            r#"TINFO:oops,27,0,"x.mkv""#,
            r#"SINFO:1,0,21,0,"fast""#,
            r#"TINFO:1,27,0,"one.mkv""#,
            r#"TINFO:2,9,0,"0:30:00""#,
        ];
        let mut job = job();
        let summary = catalog_from_lines(lines, &mut job);

        assert_eq!(summary.lines_skipped, 3);
        assert_eq!(summary.tracks_registered, 2);
        assert_eq!(job.track(1).unwrap().length_seconds, 1200);
        assert_eq!(job.track(1).unwrap().filename, "one.mkv");
        assert_eq!(job.track(1).unwrap().fps, 0.0);
    }

    #[test]
    fn malformed_length_does_not_switch_title() {
        let mut acc = TrackAccumulator::new();
        acc.feed_line(r#"TINFO:1,9,0,"0:01:00""#).unwrap();
        assert!(acc.feed_line(r#"TINFO:2,9,0,"bad""#).is_err());
        assert_eq!(acc.current_track(), 1);
    }

    #[test]
    fn emits_one_track_per_distinct_nonzero_title() {
        let lines = [
            "TCOUNT:4",
            r#"MSG:3028,0,3,"Title #1 was added","%1","1""#,
            r#"CINFO:2,0,"Blu-ray disc""#,
            r#"TINFO:1,9,0,"0:10:00""#,
            r#"TINFO:1,27,0,"a.mkv""#,
            r#"TINFO:2,9,0,"0:20:00""#,
            r#"TINFO:3,9,0,"0:30:00""#,
            r#"TINFO:3,27,0,"c.mkv""#,
            r#"TINFO:4,9,0,"0:40:00""#,
            "PRGV:10,20,65536",
        ];
        let mut job = job();
        let summary = catalog_from_lines(lines, &mut job);

        assert_eq!(summary.tracks_registered, 4);
        let numbers: Vec<u32> = job.tracks.iter().map(|t| t.track_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn revisited_title_is_not_emitted_twice() {
        let lines = [
            r#"TINFO:1,9,0,"0:10:00""#,
            r#"TINFO:2,9,0,"0:20:00""#,
            r#"TINFO:1,27,0,"late.mkv""#,
        ];
        let mut acc = TrackAccumulator::new();
        let mut emitted = Vec::new();
        for line in lines {
            if let Some(AccumulatorEvent::TrackFinalized(t)) = acc.feed_line(line).unwrap() {
                emitted.push(t.track_number);
            }
        }
        if let Some(t) = acc.finish() {
            emitted.push(t.track_number);
        }
        assert_eq!(emitted, vec![1, 2]);
    }

    #[test]
    fn total_count_does_not_touch_track_state() {
        let mut acc = TrackAccumulator::new();
        acc.feed_line(r#"TINFO:5,9,0,"0:01:00""#).unwrap();
        let event = acc.feed_line("TCOUNT:9").unwrap();
        assert_eq!(event, Some(AccumulatorEvent::DiscSummary(9)));
        assert_eq!(acc.current_track(), 5);
    }
}
