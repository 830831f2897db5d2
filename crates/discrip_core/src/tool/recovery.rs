//! Licence recovery controller.
//!
//! A protected call runs once. If its convention reports an expired
//! licence, the key refresh command runs and the original command is
//! retried exactly once. Everything else either succeeds or becomes a
//! [`ToolError`].

use serde::Serialize;

use super::command::ToolCommand;
use super::convention::{ExitClass, ExitConvention};
use super::errors::{Attempt, ToolError, ToolResult};
use super::runner::{CommandOutput, CommandRunner};

/// How a protected call succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "code")]
pub enum RecoveryOutcome {
    /// Exit code 0.
    Success,
    /// A non-zero code the convention treats as healthy (10 for info runs).
    SuccessWithExpectedNonZero(i32),
    /// The licence was refreshed and the retry was healthy.
    RetriedAndSucceeded,
}

impl RecoveryOutcome {
    fn first_run(exit_code: i32) -> Self {
        if exit_code == 0 {
            RecoveryOutcome::Success
        } else {
            RecoveryOutcome::SuccessWithExpectedNonZero(exit_code)
        }
    }
}

/// Successful protected call: outcome plus the output of the run that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedOutput {
    pub outcome: RecoveryOutcome,
    pub output: CommandOutput,
}

/// Runs commands through a [`CommandRunner`] with at most one licence refresh.
pub struct LicenseGuard<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    recovery: Option<ToolCommand>,
}

impl<'a, R: CommandRunner + ?Sized> LicenseGuard<'a, R> {
    /// Create a guard. With `recovery` set to `None` an expired licence is fatal.
    pub fn new(runner: &'a R, recovery: Option<ToolCommand>) -> Self {
        Self { runner, recovery }
    }

    /// Run `command`, classifying its exit code with `convention`.
    ///
    /// # Errors
    /// - [`ToolError::Fatal`] when the initial run or the retry fails
    /// - [`ToolError::RecoveryFailed`] when the key refresh exits non-zero
    /// - [`ToolError::RecoverySpawn`] when the key refresh cannot be started
    /// - [`ToolError::Spawn`] when a process cannot be started
    pub fn run(
        &self,
        command: &ToolCommand,
        convention: ExitConvention,
    ) -> ToolResult<GuardedOutput> {
        let first = self.runner.run(command)?;

        match convention.classify(first.exit_code) {
            ExitClass::Ok => Ok(GuardedOutput {
                outcome: RecoveryOutcome::first_run(first.exit_code),
                output: first,
            }),
            ExitClass::LicenseExpired => match &self.recovery {
                Some(recovery) => self.recover_and_retry(command, convention, recovery),
                None => {
                    tracing::warn!("MakeMKV licence expired and no key refresh is configured");
                    Err(fatal(command, first, Attempt::Initial))
                }
            },
            ExitClass::Failed => Err(fatal(command, first, Attempt::Initial)),
        }
    }

    fn recover_and_retry(
        &self,
        command: &ToolCommand,
        convention: ExitConvention,
        recovery: &ToolCommand,
    ) -> ToolResult<GuardedOutput> {
        tracing::warn!("MakeMKV licence expired, updating key with {}", recovery);

        let refreshed = self.runner.run(recovery).map_err(|e| match e {
            ToolError::Spawn { source, .. } => ToolError::RecoverySpawn {
                command: command.to_string(),
                recovery: recovery.to_string(),
                source,
            },
            other => other,
        })?;
        if ExitConvention::STANDARD.classify(refreshed.exit_code) != ExitClass::Ok {
            tracing::error!(
                "Key refresh failed with code {}: {}",
                refreshed.exit_code,
                refreshed.output.trim()
            );
            return Err(ToolError::RecoveryFailed {
                command: command.to_string(),
                recovery: recovery.to_string(),
                exit_code: refreshed.exit_code,
                output: refreshed.output,
            });
        }

        let retry = self.runner.run(command)?;
        match convention.classify(retry.exit_code) {
            ExitClass::Ok => {
                tracing::info!("MakeMKV key updated, {} succeeded on retry", command.program());
                Ok(GuardedOutput {
                    outcome: RecoveryOutcome::RetriedAndSucceeded,
                    output: retry,
                })
            }
            ExitClass::LicenseExpired | ExitClass::Failed => {
                Err(fatal(command, retry, Attempt::Retry))
            }
        }
    }
}

fn fatal(command: &ToolCommand, output: CommandOutput, attempt: Attempt) -> ToolError {
    ToolError::Fatal {
        command: command.to_string(),
        exit_code: output.exit_code,
        output: output.output,
        attempt,
    }
}
