//! Raw output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::errors::{RipError, RipResult};
use crate::logging::sanitize_filename;

/// Create the job's raw directory under `raw_root` and return it.
///
/// The first choice is `<raw_root>/<title>`. If that already exists the
/// directory becomes `<raw_root>/<title>_<stage>`, which may also exist
/// already (another run of the same stage) and is then reused.
///
/// # Errors
/// [`RipError::PathCreation`] for any failure other than the directory
/// already existing.
pub fn setup_raw_path(raw_root: &Path, title: &str, stage: &str) -> RipResult<PathBuf> {
    fs::create_dir_all(raw_root).map_err(|e| RipError::path_creation(raw_root, e))?;

    let name = dir_name(title);
    let raw_path = raw_root.join(&name);
    tracing::info!("Destination is {}", raw_path.display());

    match fs::create_dir(&raw_path) {
        Ok(()) => return Ok(raw_path),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(RipError::path_creation(raw_path, e)),
    }

    tracing::info!("{} exists. Adding stage suffix.", raw_path.display());
    let staged = raw_root.join(format!("{}_{}", name, sanitize_filename(stage)));
    tracing::info!("raw_path is {}", staged.display());

    match fs::create_dir_all(&staged) {
        Ok(()) => Ok(staged),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && staged.is_dir() => Ok(staged),
        Err(e) => Err(RipError::path_creation(staged, e)),
    }
}

fn dir_name(title: &str) -> String {
    let name = sanitize_filename(title.trim());
    match name.as_str() {
        "" | "." | ".." => "untitled".to_string(),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_title_directory_and_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("media").join("raw");

        let raw = setup_raw_path(&root, "Serenity", "1700000000").unwrap();

        assert_eq!(raw, root.join("Serenity"));
        assert!(raw.is_dir());
    }

    #[test]
    fn existing_directory_gets_stage_suffix() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Serenity")).unwrap();

        let raw = setup_raw_path(dir.path(), "Serenity", "1700000000").unwrap();

        assert_eq!(raw, dir.path().join("Serenity_1700000000"));
        assert!(raw.is_dir());
    }

    #[test]
    fn existing_staged_directory_is_reused() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Serenity")).unwrap();
        fs::create_dir(dir.path().join("Serenity_42")).unwrap();

        let raw = setup_raw_path(dir.path(), "Serenity", "42").unwrap();
        assert_eq!(raw, dir.path().join("Serenity_42"));
    }

    #[test]
    fn separators_in_title_stay_in_one_directory() {
        let dir = tempdir().unwrap();
        let raw = setup_raw_path(dir.path(), "AC/DC: Live", "1").unwrap();
        assert_eq!(raw, dir.path().join("AC_DC_ Live"));
        assert_eq!(dir_name("  "), "untitled");
        assert_eq!(dir_name(".."), "untitled");
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("raw");
        fs::write(&blocker, "not a directory").unwrap();

        let err = setup_raw_path(&blocker, "Serenity", "1").unwrap_err();
        assert!(matches!(err, RipError::PathCreation { .. }));
    }

    #[test]
    fn staged_path_blocked_by_file_is_fatal() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Serenity")).unwrap();
        fs::write(dir.path().join("Serenity_1"), "").unwrap();

        let err = setup_raw_path(dir.path(), "Serenity", "1").unwrap_err();
        match err {
            RipError::PathCreation { path, .. } => assert_eq!(path, dir.path().join("Serenity_1")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
