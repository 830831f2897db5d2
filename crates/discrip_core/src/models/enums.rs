//! Core enums used throughout the application.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a disc is ripped by MakeMKV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RipMethod {
    /// Decrypted whole-disc backup (Blu-ray only).
    Backup,
    /// Rip titles into MKV files.
    #[default]
    Mkv,
}

impl std::fmt::Display for RipMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RipMethod::Backup => write!(f, "backup"),
            RipMethod::Mkv => write!(f, "mkv"),
        }
    }
}

/// Kind of optical media in the drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscType {
    Dvd,
    Bluray,
    Music,
    Data,
    #[default]
    Unknown,
}

impl DiscType {
    /// Whether backup mode copies this media as a decrypted disc image.
    pub fn supports_backup(&self) -> bool {
        matches!(self, DiscType::Bluray)
    }
}

impl std::fmt::Display for DiscType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscType::Dvd => write!(f, "dvd"),
            DiscType::Bluray => write!(f, "bluray"),
            DiscType::Music => write!(f, "music"),
            DiscType::Data => write!(f, "data"),
            DiscType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for DiscType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dvd" => Ok(DiscType::Dvd),
            "bluray" | "blu-ray" | "bd" => Ok(DiscType::Bluray),
            "music" | "cd" => Ok(DiscType::Music),
            "data" => Ok(DiscType::Data),
            "unknown" => Ok(DiscType::Unknown),
            other => Err(format!("unknown disc type '{}'", other)),
        }
    }
}
