//! External tool invocation.
//!
//! Every `makemkvcon` call goes through the same path:
//!
//! ```text
//! ToolCommand ──► LicenseGuard ──► CommandRunner ──► CommandOutput
//!                     │
//!                     └── ExitConvention classifies the exit code
//!                         (253 under `probe` runs the key refresh once)
//! ```
//!
//! Calls are blocking and strictly sequential: one process is in flight at
//! a time and its combined output is captured before the next starts.

mod command;
mod convention;
mod errors;
mod makemkv;
mod recovery;
mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use command::ToolCommand;
pub use convention::{ExitClass, ExitConvention};
pub use errors::{Attempt, ToolError, ToolResult};
pub use makemkv::MakeMkv;
pub use recovery::{GuardedOutput, LicenseGuard, RecoveryOutcome};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
