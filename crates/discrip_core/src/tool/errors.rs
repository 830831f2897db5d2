//! Error types for tool invocation.

use std::io;

use thiserror::Error;

/// Which run of a protected command produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// First run.
    Initial,
    /// Single retry after the licence key refresh.
    Retry,
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attempt::Initial => write!(f, "initial run"),
            Attempt::Retry => write!(f, "retry after key refresh"),
        }
    }
}

/// A failed external tool invocation.
///
/// All variants carry the command line, so the job error shows exactly
/// what was run.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool exited with a code its convention treats as failure.
    #[error("Call to {command} failed with code: {exit_code} ({attempt}): {output}")]
    Fatal {
        command: String,
        exit_code: i32,
        output: String,
        attempt: Attempt,
    },

    /// The key refresh action failed, so the original command was not retried.
    #[error("Key refresh '{recovery}' for {command} failed with code: {exit_code}: {output}")]
    RecoveryFailed {
        command: String,
        recovery: String,
        exit_code: i32,
        output: String,
    },

    /// The key refresh command could not be started.
    #[error("Key refresh '{recovery}' for {command} could not be started: {source}")]
    RecoverySpawn {
        command: String,
        recovery: String,
        #[source]
        source: io::Error,
    },

    /// The process could not be started.
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl ToolError {
    /// Exit code reported by the failing process, if it ran.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ToolError::Fatal { exit_code, .. } | ToolError::RecoveryFailed { exit_code, .. } => {
                Some(*exit_code)
            }
            ToolError::RecoverySpawn { .. } | ToolError::Spawn { .. } => None,
        }
    }

    /// Captured output of the failing process.
    pub fn output(&self) -> Option<&str> {
        match self {
            ToolError::Fatal { output, .. } | ToolError::RecoveryFailed { output, .. } => {
                Some(output)
            }
            ToolError::RecoverySpawn { .. } | ToolError::Spawn { .. } => None,
        }
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
