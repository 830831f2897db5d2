//! Runs one rip job end to end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::errors::{RipError, RipResult};
use super::filter::{LengthPolicy, TrackResult, TrackVerdict};
use super::paths::setup_raw_path;
use super::strategy::{select_strategy, RipStrategy};
use crate::config::RipSettings;
use crate::jobs::{RipJob, TrackStore};
use crate::logging::JobLogger;
use crate::protocol::{catalog_from_lines, find_disc_index, parse_progress};
use crate::tool::{
    CommandRunner, ExitConvention, GuardedOutput, LicenseGuard, MakeMkv, RecoveryOutcome,
    ToolCommand, ToolError,
};

/// What a finished rip produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RipReport {
    /// Directory the titles were written to.
    pub raw_path: PathBuf,
    pub strategy: RipStrategy,
    /// MakeMKV disc index of the drive.
    pub disc_index: u32,
    /// How the device probe succeeded.
    pub probe: RecoveryOutcome,
    /// Title count from the track-info pass.
    pub title_count: Option<u32>,
    /// Per-title verdicts; empty unless the strategy was per-track.
    pub tracks: Vec<TrackResult>,
}

impl RipReport {
    /// Titles that were ripped in per-track mode.
    pub fn selected(&self) -> impl Iterator<Item = &TrackResult> {
        self.tracks.iter().filter(|t| t.verdict.is_selected())
    }
}

/// Drives `makemkvcon` for rip jobs.
pub struct Ripper<R: CommandRunner> {
    settings: RipSettings,
    raw_root: PathBuf,
    runner: R,
    logger: Option<Arc<JobLogger>>,
}

impl<R: CommandRunner> Ripper<R> {
    pub fn new(settings: RipSettings, raw_root: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            settings,
            raw_root: raw_root.into(),
            runner,
            logger: None,
        }
    }

    /// Mirror decisions and tool output into a per-job log.
    pub fn with_logger(mut self, logger: Arc<JobLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run `job`, filling its catalog on the way.
    ///
    /// # Errors
    /// Any [`RipError`]; the job is failed and nothing further runs.
    pub fn run(&self, job: &mut RipJob) -> RipResult<RipReport> {
        if let Some(logger) = &self.logger {
            logger.phase(&format!("MakeMKV rip of {} ({})", job.title, job.device_path));
        }

        match self.run_steps(job) {
            Ok(report) => {
                self.log_success(&format!(
                    "Exiting MakeMKV processing with return value of: {}",
                    report.raw_path.display()
                ));
                Ok(report)
            }
            Err(e) => {
                tracing::error!("MakeMKV rip of {} failed: {}", job.device_path, e);
                if let Some(logger) = &self.logger {
                    logger.error(&e.to_string());
                    logger.flush();
                }
                Err(e)
            }
        }
    }

    fn run_steps(&self, job: &mut RipJob) -> RipResult<RipReport> {
        let mkv = MakeMkv::new(&self.settings);
        let guard = LicenseGuard::new(&self.runner, mkv.update_key());

        // confirm MakeMKV works and the key has not expired
        let probe = self.run_tool(&guard, &mkv.probe(&job.device_path), ExitConvention::PROBE)?;
        self.note(&format!(
            "Starting MakeMKV rip. Method is {}",
            self.settings.method
        ));

        let drives = self.run_tool(&guard, &mkv.drive_list(), ExitConvention::INFO)?;
        let disc_index = find_disc_index(drives.output.lines(), &job.device_path)
            .ok_or_else(|| RipError::drive_not_found(&job.device_path))?;
        self.note(&format!("MakeMKV disc number: {}", disc_index));

        let raw_path = setup_raw_path(&self.raw_root, &job.title, &job.stage)?;

        let strategy = select_strategy(&self.settings, job.disc_type);
        self.detail(&format!("Selected {} strategy for {}", strategy, job.disc_type));

        if strategy.needs_track_info() {
            self.load_track_info(&guard, &mkv, disc_index, job)?;
        }

        let mut tracks = Vec::new();
        match strategy {
            RipStrategy::Backup => {
                self.note("Backing up disc");
                self.run_tool(&guard, &mkv.backup(disc_index, &raw_path), ExitConvention::STANDARD)?;
            }
            RipStrategy::WholeDisc => {
                self.note("No maximum length set, ripping all titles");
                self.run_tool(
                    &guard,
                    &mkv.rip_all(&job.device_path, &raw_path),
                    ExitConvention::STANDARD,
                )?;
            }
            RipStrategy::PerTrack => {
                tracks = self.rip_tracks(&guard, &mkv, job, &raw_path)?;
            }
        }

        Ok(RipReport {
            raw_path,
            strategy,
            disc_index,
            probe: probe.outcome,
            title_count: job.title_count(),
            tracks,
        })
    }

    fn load_track_info(
        &self,
        guard: &LicenseGuard<'_, R>,
        mkv: &MakeMkv<'_>,
        disc_index: u32,
        job: &mut RipJob,
    ) -> RipResult<()> {
        tracing::debug!("Getting MakeMKV track info for disc {}", disc_index);
        let info = self.run_tool(guard, &mkv.track_info(disc_index), ExitConvention::INFO)?;
        let summary = catalog_from_lines(info.output.lines(), job);
        self.detail(&format!(
            "Catalog: {} tracks registered, {} lines skipped",
            summary.tracks_registered, summary.lines_skipped
        ));
        Ok(())
    }

    fn rip_tracks(
        &self,
        guard: &LicenseGuard<'_, R>,
        mkv: &MakeMkv<'_>,
        job: &RipJob,
        raw_path: &Path,
    ) -> RipResult<Vec<TrackResult>> {
        let policy = LengthPolicy::from_settings(&self.settings);
        let title_count = job
            .title_count()
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        let mut results = Vec::with_capacity(job.tracks().len());

        for track in job.tracks() {
            let verdict = policy.classify(track, raw_path);
            match &verdict {
                TrackVerdict::TooShort => self.skip(&format!(
                    "Track #{} of {}. Length ({}) is less than minimum length ({}). Skipping",
                    track.track_number, title_count, track.length_seconds, policy.min_length
                )),
                TrackVerdict::TooLong => self.skip(&format!(
                    "Track #{} of {}. Length ({}) is greater than maximum length ({}). Skipping",
                    track.track_number, title_count, track.length_seconds, policy.max_length
                )),
                TrackVerdict::Selected { output_path } => {
                    self.note(&format!(
                        "Processing track #{} of {}. Length is {} seconds.",
                        track.track_number, title_count, track.length_seconds
                    ));
                    self.note(&format!(
                        "Ripping title {} to {}",
                        track.track_number,
                        output_path.display()
                    ));
                    self.run_tool(
                        guard,
                        &mkv.rip_title(&job.device_path, track.track_number, raw_path),
                        ExitConvention::STANDARD,
                    )?;
                }
            }

            results.push(TrackResult {
                track_number: track.track_number,
                length_seconds: track.length_seconds,
                verdict,
            });
        }

        Ok(results)
    }

    /// Run one protected command, copying its output into the job log.
    fn run_tool(
        &self,
        guard: &LicenseGuard<'_, R>,
        command: &ToolCommand,
        convention: ExitConvention,
    ) -> Result<GuardedOutput, ToolError> {
        if let Some(logger) = &self.logger {
            logger.command(&command.to_string());
            logger.reset_progress();
            logger.clear_tail();
        }
        tracing::debug!("Running {} under {} convention", command, convention.name());

        match guard.run(command, convention) {
            Ok(result) => {
                if result.outcome == RecoveryOutcome::RetriedAndSucceeded {
                    self.warn("MakeMKV key had expired; key updated and command retried");
                }
                self.record_output(result.output.lines());
                Ok(result)
            }
            Err(e) => {
                if let Some(output) = e.output() {
                    self.record_output(output.lines());
                }
                if let Some(logger) = &self.logger {
                    logger.show_tail(command.program());
                }
                Err(e)
            }
        }
    }

    fn record_output<'a>(&self, lines: impl Iterator<Item = &'a str>) {
        let Some(logger) = &self.logger else {
            return;
        };
        for line in lines {
            logger.output_line(line);
            if let Some(percent) = parse_progress(line) {
                logger.progress(percent);
            }
        }
        logger.flush();
    }

    fn note(&self, message: &str) {
        tracing::info!("{}", message);
        if let Some(logger) = &self.logger {
            logger.info(message);
        }
    }

    fn detail(&self, message: &str) {
        tracing::debug!("{}", message);
        if let Some(logger) = &self.logger {
            logger.debug(message);
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        if let Some(logger) = &self.logger {
            logger.warn(message);
        }
    }

    fn skip(&self, message: &str) {
        tracing::info!("{}", message);
        if let Some(logger) = &self.logger {
            logger.skip(message);
        }
    }

    fn log_success(&self, message: &str) {
        tracing::info!("{}", message);
        if let Some(logger) = &self.logger {
            logger.success(message);
            logger.flush();
        }
    }
}
