//! Rip job errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tool::ToolError;

/// A rip job that could not complete.
#[derive(Error, Debug)]
pub enum RipError {
    /// The raw output directory could not be created.
    #[error("Couldn't create the base file path: {path}: {source}")]
    PathCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A `makemkvcon` call (or the key refresh) failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// No `DRV:` line mentioned the job's device.
    #[error("MakeMKV did not report a disc index for {device}")]
    DriveNotFound { device: String },

    /// The per-job log file could not be created.
    #[error("Failed to create job log: {0}")]
    Logging(#[source] io::Error),
}

impl RipError {
    pub fn path_creation(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PathCreation {
            path: path.into(),
            source,
        }
    }

    pub fn drive_not_found(device: impl Into<String>) -> Self {
        Self::DriveNotFound {
            device: device.into(),
        }
    }

    /// Exit code of the failing tool, when the failure came from one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RipError::Tool(e) => e.exit_code(),
            _ => None,
        }
    }
}

/// Result type for rip operations.
pub type RipResult<T> = Result<T, RipError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::Attempt;

    #[test]
    fn tool_errors_keep_their_message() {
        let err = RipError::from(ToolError::Fatal {
            command: "makemkvcon mkv dev:/dev/sr0 all /raw".to_string(),
            exit_code: 12,
            output: "Failed to save title 0".to_string(),
            attempt: Attempt::Initial,
        });
        assert_eq!(err.exit_code(), Some(12));
        assert!(err.to_string().contains("Failed to save title 0"));
    }

    #[test]
    fn path_creation_names_path() {
        let err = RipError::path_creation(
            "/media/raw/Movie",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().contains("/media/raw/Movie"));
        assert_eq!(err.exit_code(), None);
    }
}
