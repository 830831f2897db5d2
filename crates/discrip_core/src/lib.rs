//! discrip core - backend logic for MakeMKV disc rips.
//!
//! This crate drives `makemkvcon`, decodes its machine-readable status
//! stream into a track catalog, and runs one rip job end to end:
//! probe (with licence key recovery), disc lookup, track catalog,
//! strategy selection and the rip commands themselves.
//!
//! It has no UI dependencies and can be used by the CLI or any other
//! front end that supplies a job and a [`jobs::TrackStore`].

pub mod config;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod rip;
pub mod tool;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
