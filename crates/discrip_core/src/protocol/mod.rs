//! MakeMKV status protocol.
//!
//! `makemkvcon -r` writes one machine-readable record per line:
//!
//! ```text
//! TCOUNT:3
//! TINFO:1,9,0,"0:12:30"
//! TINFO:1,27,0,"title_t01.mkv"
//! SINFO:1,0,20,0,"16:9"
//! SINFO:1,0,21,0,"23.976 (24000/1001)"
//! DRV:0,2,999,1,"BD-ROM HL-DT-ST","MOVIE","/dev/sr0"
//! PRGV:120,4500,65536
//! ```
//!
//! This module provides:
//! - **Decoder**: one line into a [`StatusRecord`]
//! - **Accumulator**: records into [`TrackDescriptor`](crate::models::TrackDescriptor)s
//! - **Drive lookup**: the MakeMKV disc index for a device path
//! - **Progress**: `PRGV` lines into a percentage
//!
//! Malformed lines are reported as [`ProtocolError`] and skipped by the
//! callers; one bad line never loses the rest of a disc's metadata.

mod accumulator;
mod decoder;
mod drive;
mod length;
mod progress;
mod record;

pub use accumulator::{catalog_from_lines, AccumulatorEvent, CatalogSummary, TrackAccumulator};
pub use decoder::decode_line;
pub use drive::find_disc_index;
pub use length::{format_hms, parse_hms};
pub use progress::parse_progress;
pub use record::{ProtocolError, ProtocolResult, RecordKind, StatusRecord};
