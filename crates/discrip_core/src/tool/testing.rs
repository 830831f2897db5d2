//! Scripted command runner for tests.

use std::collections::VecDeque;
use std::io;

use parking_lot::Mutex;

use super::command::ToolCommand;
use super::errors::{ToolError, ToolResult};
use super::runner::{CommandOutput, CommandRunner};

/// Replays queued responses in order and records every command it was given.
///
/// A command that arrives after the script is exhausted gets exit code 0
/// and no output. Programs marked with [`ScriptedRunner::fail_spawn`] fail
/// to start without consuming a response.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<(i32, String)>>,
    calls: Mutex<Vec<ToolCommand>>,
    unstartable: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn respond(self, exit_code: i32, output: &str) -> Self {
        self.responses
            .lock()
            .push_back((exit_code, output.to_string()));
        self
    }

    /// Make every run of `program` fail with [`ToolError::Spawn`].
    pub fn fail_spawn(self, program: &str) -> Self {
        self.unstartable.lock().push(program.to_string());
        self
    }

    /// All commands run so far.
    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.lock().clone()
    }

    /// Number of commands run whose program is `program`.
    pub fn count_program(&self, program: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.program() == program)
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand) -> ToolResult<CommandOutput> {
        self.calls.lock().push(command.clone());
        if self.unstartable.lock().iter().any(|p| p == command.program()) {
            return Err(ToolError::Spawn {
                command: command.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        let (exit_code, output) = self.responses.lock().pop_front().unwrap_or_default();
        Ok(CommandOutput::new(exit_code, output))
    }
}
