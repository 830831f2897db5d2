//! Track store trait.

use crate::models::TrackDescriptor;

/// Receiver for the track catalog of one disc.
///
/// Implemented by whatever owns job persistence. The accumulator calls
/// `register_track` once per finalized title, in finalization order, and
/// `set_title_count` once per disc.
pub trait TrackStore {
    /// Register (or update) a track.
    fn register_track(&mut self, track: TrackDescriptor);

    /// Record the total title count reported by the tool.
    fn set_title_count(&mut self, count: u32);

    /// Tracks registered so far, in catalog order.
    fn tracks(&self) -> &[TrackDescriptor];

    /// Title count, if one was reported.
    fn title_count(&self) -> Option<u32>;
}
