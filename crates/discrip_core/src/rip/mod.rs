//! Rip job orchestration.
//!
//! A job runs these steps in order, one `makemkvcon` process at a time:
//!
//! 1. Probe the drive (licence key refresh on exit 253)
//! 2. Look up the MakeMKV disc index for the device
//! 3. Create the raw output directory
//! 4. Select the strategy ([`RipStrategy`])
//! 5. Fill the track catalog (every strategy except backup)
//! 6. Run the rip command(s)

mod errors;
mod filter;
mod paths;
mod ripper;
mod strategy;

pub use errors::{RipError, RipResult};
pub use filter::{LengthPolicy, TrackResult, TrackVerdict};
pub use paths::setup_raw_path;
pub use ripper::{RipReport, Ripper};
pub use strategy::{select_strategy, RipStrategy};
