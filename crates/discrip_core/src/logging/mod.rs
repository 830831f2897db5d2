//! Logging for rip jobs.
//!
//! Two layers:
//! - `tracing` macros for library diagnostics, routed through the global
//!   subscriber set up by [`init_tracing`]
//! - [`JobLogger`] for the per-job log file, which also receives the raw
//!   `makemkvcon` output and can mirror lines to a caller-supplied sink
//!
//! # Example
//!
//! ```no_run
//! use discrip_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::new("Movie_1700000000", "/home/arm/logs", LogConfig::default(), None)
//!     .unwrap();
//! logger.phase("MakeMKV");
//! logger.command("makemkvcon info dev:/dev/sr0");
//! logger.progress(40);
//! logger.success("Rip complete");
//! ```

mod job_logger;
mod types;

pub use job_logger::{JobLogger, JobLoggerBuilder};
pub use types::{LogConfig, LogLevel, LogSink, MessagePrefix};

pub(crate) use job_logger::sanitize_filename;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter()));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .try_init();
}

/// Tracing for tests (warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
