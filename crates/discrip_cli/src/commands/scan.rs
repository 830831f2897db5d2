//! `discrip scan`

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use discrip_core::jobs::TrackStore;
use discrip_core::models::TrackDescriptor;
use discrip_core::protocol::{catalog_from_lines, format_hms};

/// In-memory catalog for one dump.
#[derive(Debug, Default)]
struct Catalog {
    title_count: Option<u32>,
    tracks: Vec<TrackDescriptor>,
}

impl TrackStore for Catalog {
    fn register_track(&mut self, track: TrackDescriptor) {
        self.tracks.retain(|t| t.track_number != track.track_number);
        self.tracks.push(track);
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

pub fn run(dump: &Path, json: bool) -> Result<()> {
    let content =
        fs::read_to_string(dump).with_context(|| format!("Failed to read {}", dump.display()))?;
    let catalog = scan_text(&content);

    if json {
        let value = serde_json::json!({
            "title_count": catalog.title_count,
            "tracks": catalog.tracks,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match catalog.title_count {
        Some(count) => println!("{} titles", count),
        None => println!("No TCOUNT line found"),
    }
    for track in catalog.tracks() {
        println!(
            "  #{:<3} {:>9}  {:<6} {:>7.3}  {}",
            track.track_number,
            format_hms(track.length_seconds),
            track.aspect_ratio,
            track.fps,
            track.filename
        );
    }
    Ok(())
}

fn scan_text(content: &str) -> Catalog {
    let mut catalog = Catalog::default();
    catalog_from_lines(content.lines(), &mut catalog);
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_builds_catalog() {
        let dump = "TCOUNT:2\nTINFO:1,9,0,\"0:12:30\"\nTINFO:1,27,0,\"title1.mkv\"\nTINFO:2,9,0,\"1:05:00\"\n";
        let catalog = scan_text(dump);
        assert_eq!(catalog.title_count(), Some(2));
        assert_eq!(catalog.tracks().len(), 2);
        assert_eq!(catalog.tracks()[0].length_seconds, 750);
    }

    #[test]
    fn run_reads_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.txt");
        fs::write(&path, "TCOUNT:0\n").unwrap();
        run(&path, true).unwrap();
        assert!(run(&dir.path().join("missing.txt"), false).is_err());
    }
}
