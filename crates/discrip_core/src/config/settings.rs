//! Settings sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::models::RipMethod;

/// A maximum length at or above this value disables per-title filtering.
pub const UNBOUNDED_MAX_LENGTH: u64 = 99999;

/// Root settings structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ripping: RipSettings,

    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How titles are pulled off the disc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RipSettings {
    /// `backup` (Blu-ray only) or `mkv`.
    #[serde(default)]
    pub method: RipMethod,

    /// Shortest title to keep, in seconds.
    #[serde(default = "default_min_length")]
    pub min_length: u64,

    /// Longest title to keep, in seconds. 99999 or more means unbounded.
    #[serde(default = "default_max_length")]
    pub max_length: u64,

    /// Extra arguments passed to `makemkvcon`, split on whitespace.
    #[serde(default)]
    pub mkv_args: String,

    /// `makemkvcon` binary name or path.
    #[serde(default = "default_makemkv_binary")]
    pub makemkv_binary: String,

    /// Command run when the MakeMKV key has expired. Empty disables the refresh.
    #[serde(default = "default_update_key_command")]
    pub update_key_command: String,
}

impl RipSettings {
    /// Whether `max_length` is the unbounded sentinel.
    pub fn is_unbounded(&self) -> bool {
        self.max_length >= UNBOUNDED_MAX_LENGTH
    }

    /// `mkv_args` split into separate arguments.
    pub fn extra_args(&self) -> Vec<String> {
        self.mkv_args
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn default_min_length() -> u64 {
    600
}

fn default_max_length() -> u64 {
    UNBOUNDED_MAX_LENGTH
}

fn default_makemkv_binary() -> String {
    "makemkvcon".to_string()
}

fn default_update_key_command() -> String {
    "/bin/bash /opt/arm/scripts/update_key.sh".to_string()
}

impl Default for RipSettings {
    fn default() -> Self {
        Self {
            method: RipMethod::default(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            mkv_args: String::new(),
            makemkv_binary: default_makemkv_binary(),
            update_key_command: default_update_key_command(),
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root under which each job gets its own raw directory.
    #[serde(default = "default_raw_path")]
    pub raw_path: String,

    /// Folder for per-job log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_raw_path() -> String {
    "raw".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_path: default_raw_path(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level for the global subscriber when `RUST_LOG` is unset.
    #[serde(default)]
    pub level: LogLevel,

    /// Keep raw tool output out of the live view (it still goes to the file).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of log lines shown when a job fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress percentage step between compact progress lines.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Ripping,
    Paths,
    Logging,
}

impl ConfigSection {
    /// Every section, in file order.
    pub const ALL: [ConfigSection; 3] = [
        ConfigSection::Ripping,
        ConfigSection::Paths,
        ConfigSection::Logging,
    ];

    /// TOML table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Ripping => "ripping",
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in a generated file.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Ripping => "MakeMKV rip method, title length limits and tool commands",
            ConfigSection::Paths => "Raw output root and log folder",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
