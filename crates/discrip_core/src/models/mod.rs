//! Data models shared across the crate.
//!
//! - Enums for rip method and disc type
//! - Track descriptors produced by the status protocol accumulator

mod enums;
mod track;

pub use enums::{DiscType, RipMethod};
pub use track::{TrackDescriptor, SOURCE_LABEL};
