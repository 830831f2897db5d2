//! Process execution.

use std::process::Command;

use super::command::ToolCommand;
use super::errors::{ToolError, ToolResult};

/// Exit code and captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or -1 when the process was killed by a signal.
    pub exit_code: i32,
    /// Combined stdout and stderr.
    pub output: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    /// Output split into lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines()
    }
}

/// Runs a command to completion.
///
/// Implementations block until the process exits and its output has been
/// fully captured.
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput> {
        (**self).run(command)
    }
}

/// Runner backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput> {
        tracing::debug!("Running: {}", command);

        let output = Command::new(command.program())
            .args(command.arguments())
            .output()
            .map_err(|source| ToolError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }

        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!("{} exited with code {}", command.program(), exit_code);

        Ok(CommandOutput::new(exit_code, combined))
    }
}
