//! Per-job log file.
//!
//! Every line goes to `<logs>/<job>.log`. Tool output is always written to
//! the file and kept in a tail buffer; in compact mode it is not forwarded
//! to the sink, and progress lines are thinned to `progress_step` intervals.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, LogSink, MessagePrefix};

pub struct JobLogger {
    job_name: String,
    log_path: PathBuf,
    file_writer: Mutex<Option<BufWriter<File>>>,
    sink: Option<LogSink>,
    config: LogConfig,
    tail_buffer: Mutex<VecDeque<String>>,
    last_progress: Mutex<Option<u32>>,
}

impl JobLogger {
    /// Create the log file `<log_dir>/<job_name>.log`, truncating an old one.
    pub fn new(
        job_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        sink: Option<LogSink>,
    ) -> std::io::Result<Self> {
        let job_name = job_name.into();
        let log_dir = log_dir.as_ref();
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&job_name)));
        let file = File::create(&log_path)?;

        Ok(Self {
            job_name,
            log_path,
            file_writer: Mutex::new(Some(BufWriter::new(file))),
            sink,
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            config,
            last_progress: Mutex::new(None),
        })
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Write `message` if `level` passes the configured minimum.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        let formatted = self.format_message(message);
        self.write_file(&formatted);
        self.forward(&formatted);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    /// A title left out of the rip.
    pub fn skip(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Skip.format(message));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Log a progress percentage.
    ///
    /// In compact mode only the first report, each crossing of a
    /// `progress_step` boundary and 100% are logged. Returns whether the
    /// line was logged.
    pub fn progress(&self, percent: u32) -> bool {
        if self.config.compact {
            let mut last = self.last_progress.lock();
            let step = self.config.progress_step.max(1);
            let crossed = match *last {
                None => true,
                Some(prev) => percent / step > prev / step || (percent >= 100 && prev < 100),
            };
            if !crossed {
                return false;
            }
            *last = Some(percent);
        }

        self.log(LogLevel::Info, &format!("Progress: {}%", percent));
        true
    }

    /// Record one line of tool output.
    pub fn output_line(&self, line: &str) {
        {
            let mut buffer = self.tail_buffer.lock();
            if self.config.error_tail > 0 {
                if buffer.len() >= self.config.error_tail {
                    buffer.pop_front();
                }
                buffer.push_back(line.to_string());
            }
        }

        let formatted = self.format_message(line);
        self.write_file(&formatted);
        if !self.config.compact {
            self.forward(&formatted);
        }
    }

    /// Reset progress filtering before the next tool run.
    pub fn reset_progress(&self) {
        *self.last_progress.lock() = None;
    }

    /// Print the tail buffer under a `[header/tail]` marker.
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        let marker = self.format_message(&format!("[{}/tail]", header));
        self.write_file(&marker);
        self.forward(&marker);
        for line in buffer.iter() {
            let formatted = self.format_message(line);
            self.write_file(&formatted);
            self.forward(&formatted);
        }
    }

    /// Drop buffered lines so the next tail shows only newer output.
    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    pub fn flush(&self) {
        if let Some(writer) = self.file_writer.lock().as_mut() {
            let _ = writer.flush();
        }
    }

    /// Flush and close the file. Later lines only reach the sink.
    pub fn close(&self) {
        self.flush();
        *self.file_writer.lock() = None;
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn write_file(&self, formatted: &str) {
        if let Some(writer) = self.file_writer.lock().as_mut() {
            let _ = writeln!(writer, "{}", formatted);
        }
    }

    fn forward(&self, formatted: &str) {
        if let Some(sink) = &self.sink {
            sink(formatted);
        }
    }
}

impl Drop for JobLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Replace path separators and shell-hostile characters with `_`.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            _ => c,
        })
        .collect()
}

/// Fluent construction of a [`JobLogger`].
pub struct JobLoggerBuilder {
    job_name: String,
    log_dir: PathBuf,
    config: LogConfig,
    sink: Option<LogSink>,
}

impl JobLoggerBuilder {
    pub fn new(job_name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_name: job_name.into(),
            log_dir: log_dir.into(),
            config: LogConfig::default(),
            sink: None,
        }
    }

    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    pub fn timestamps(mut self, show: bool) -> Self {
        self.config.show_timestamps = show;
        self
    }

    pub fn sink(mut self, sink: LogSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> std::io::Result<JobLogger> {
        JobLogger::new(self.job_name, self.log_dir, self.config, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn counting_sink() -> (LogSink, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let sink: LogSink = Box::new(move |_line: &str| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (sink, count)
    }

    #[test]
    fn creates_sanitized_log_file() {
        let dir = tempdir().unwrap();
        let logger =
            JobLogger::new("Movie: Part 1_17", dir.path(), LogConfig::default(), None).unwrap();

        assert!(logger.log_path().exists());
        assert!(logger.log_path().ends_with("Movie_ Part 1_17.log"));
    }

    #[test]
    fn writes_to_file_and_sink() {
        let dir = tempdir().unwrap();
        let (sink, count) = counting_sink();
        let logger = JobLogger::new("job", dir.path(), LogConfig::default(), Some(sink)).unwrap();

        logger.info("Starting MakeMKV rip");
        logger.debug("below the default level");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("Starting MakeMKV rip"));
        assert!(!content.contains("below the default level"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn compact_output_stays_in_file() {
        let dir = tempdir().unwrap();
        let (sink, count) = counting_sink();
        let logger = JobLoggerBuilder::new("job", dir.path())
            .compact(true)
            .sink(sink)
            .build()
            .unwrap();

        logger.output_line("MSG:5036,0,1,\"Copy complete.\"");
        logger.flush();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("Copy complete."));
    }

    #[test]
    fn verbose_output_reaches_sink() {
        let dir = tempdir().unwrap();
        let (sink, count) = counting_sink();
        let logger = JobLoggerBuilder::new("job", dir.path())
            .config(LogConfig::debug())
            .sink(sink)
            .build()
            .unwrap();

        logger.output_line("PRGV:1,2,3");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn compact_mode_filters_progress() {
        let dir = tempdir().unwrap();
        let logger = JobLogger::new("job", dir.path(), LogConfig::default(), None).unwrap();

        assert!(logger.progress(0));
        assert!(!logger.progress(5));
        assert!(!logger.progress(19));
        assert!(logger.progress(20));
        assert!(!logger.progress(25));
        assert!(logger.progress(61));
        assert!(logger.progress(100));
        assert!(!logger.progress(100));

        logger.reset_progress();
        assert!(logger.progress(3));
    }

    #[test]
    fn tail_buffer_maintains_limit() {
        let dir = tempdir().unwrap();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&lines);
        let config = LogConfig {
            error_tail: 5,
            show_timestamps: false,
            ..LogConfig::default()
        };
        let sink: LogSink = Box::new(move |line: &str| seen.lock().push(line.to_string()));
        let logger = JobLogger::new("job", dir.path(), config, Some(sink)).unwrap();

        for i in 0..10 {
            logger.output_line(&format!("Line {}", i));
        }
        logger.show_tail("tool");

        // compact mode: only the tail reaches the sink
        assert_eq!(
            *lines.lock(),
            ["[tool/tail]", "Line 5", "Line 6", "Line 7", "Line 8", "Line 9"]
        );

        lines.lock().clear();
        logger.clear_tail();
        logger.show_tail("tool");
        assert!(lines.lock().is_empty());
    }

    #[test]
    fn show_tail_writes_marker() {
        let dir = tempdir().unwrap();
        let logger = JobLoggerBuilder::new("job", dir.path())
            .timestamps(false)
            .build()
            .unwrap();

        logger.output_line("Failed to open disc");
        logger.show_tail("makemkvcon");
        logger.flush();

        let content = fs::read_to_string(logger.log_path()).unwrap();
        assert!(content.contains("[makemkvcon/tail]\nFailed to open disc"));
    }

    #[test]
    fn sanitizes_filename() {
        assert_eq!(sanitize_filename("normal_name"), "normal_name");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
    }
}
