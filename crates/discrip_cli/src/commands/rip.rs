//! `discrip rip`

use std::sync::Arc;

use anyhow::{Context, Result};
use discrip_core::config::ConfigManager;
use discrip_core::jobs::RipJob;
use discrip_core::logging::{JobLogger, LogConfig, LogSink};
use discrip_core::models::DiscType;
use discrip_core::rip::{RipError, Ripper, TrackVerdict};
use discrip_core::tool::SystemRunner;

pub fn run(
    config: &ConfigManager,
    device: &str,
    disc_type: DiscType,
    title: &str,
    stage: &str,
    json: bool,
) -> Result<()> {
    let settings = config.settings();
    let mut job = RipJob::new(device, disc_type, title, stage);

    // JSON output keeps stdout clean; the job log still gets every line
    let sink: Option<LogSink> = if json {
        None
    } else {
        Some(Box::new(|line: &str| println!("{}", line)))
    };
    let logger = JobLogger::new(
        job.job_name(),
        config.logs_folder(),
        LogConfig::from(&settings.logging),
        sink,
    )
    .map_err(RipError::Logging)?;
    let logger = Arc::new(logger);

    let ripper = Ripper::new(settings.ripping.clone(), config.raw_root(), SystemRunner)
        .with_logger(Arc::clone(&logger));

    let report = ripper
        .run(&mut job)
        .with_context(|| format!("Rip of {} failed, see {}", device, logger.log_path().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("Raw path:  {}", report.raw_path.display());
    println!("Strategy:  {}", report.strategy);
    println!("Disc:      {}", report.disc_index);
    for track in &report.tracks {
        let verdict = match &track.verdict {
            TrackVerdict::TooShort => "skipped (too short)".to_string(),
            TrackVerdict::TooLong => "skipped (too long)".to_string(),
            TrackVerdict::Selected { output_path } => format!("ripped to {}", output_path.display()),
        };
        println!("  #{:<3} {:>6}s  {}", track.track_number, track.length_seconds, verdict);
    }

    Ok(())
}
