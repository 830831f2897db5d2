//! Rip job description and the track store seam.
//!
//! The persistent job database is an external collaborator. This module
//! defines the [`TrackStore`] trait the core writes the catalog through,
//! and [`RipJob`], an in-memory job that implements it.

mod store;
mod types;

pub use store::TrackStore;
pub use types::RipJob;
