//! `discrip config`

use std::fs;

use anyhow::{bail, Context, Result};
use discrip_core::config::{ConfigManager, ConfigSection};
use discrip_core::models::RipMethod;

pub fn show(config: &ConfigManager) -> Result<()> {
    let content = fs::read_to_string(config.path())
        .with_context(|| format!("Failed to read {}", config.path().display()))?;
    println!("# {}", config.path().display());
    print!("{}", content);
    Ok(())
}

/// Requested `[ripping]` edits; `None` leaves a value as it is.
#[derive(Debug, Default)]
pub struct RippingChanges {
    pub method: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub mkv_args: Option<String>,
}

pub fn set_ripping(config: &mut ConfigManager, changes: RippingChanges) -> Result<()> {
    let ripping = &mut config.settings_mut().ripping;

    if let Some(method) = changes.method {
        ripping.method = match method.to_ascii_lowercase().as_str() {
            "backup" => RipMethod::Backup,
            "mkv" => RipMethod::Mkv,
            other => bail!("unknown rip method '{}', expected backup or mkv", other),
        };
    }
    if let Some(min_length) = changes.min_length {
        ripping.min_length = min_length;
    }
    if let Some(max_length) = changes.max_length {
        ripping.max_length = max_length;
    }
    if let Some(mkv_args) = changes.mkv_args {
        ripping.mkv_args = mkv_args;
    }
    if ripping.min_length > ripping.max_length {
        bail!(
            "min_length ({}) is greater than max_length ({})",
            ripping.min_length,
            ripping.max_length
        );
    }

    config
        .update_section(ConfigSection::Ripping)
        .context("Failed to save [ripping]")?;
    tracing::info!("Updated [ripping] in {}", config.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ripping_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discrip.toml");
        let mut config = ConfigManager::new(&path);
        config.load_or_create().unwrap();

        set_ripping(
            &mut config,
            RippingChanges {
                method: Some("backup".to_string()),
                max_length: Some(5400),
                ..RippingChanges::default()
            },
        )
        .unwrap();

        let mut reloaded = ConfigManager::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().ripping.method, RipMethod::Backup);
        assert_eq!(reloaded.settings().ripping.max_length, 5400);
    }

    #[test]
    fn rejects_unknown_method_and_inverted_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigManager::new(dir.path().join("discrip.toml"));
        config.load_or_create().unwrap();

        let bad_method = RippingChanges {
            method: Some("iso".to_string()),
            ..RippingChanges::default()
        };
        assert!(set_ripping(&mut config, bad_method).is_err());

        let inverted = RippingChanges {
            min_length: Some(7200),
            max_length: Some(60),
            ..RippingChanges::default()
        };
        assert!(set_ripping(&mut config, inverted).is_err());
    }
}
