//! Rip settings.
//!
//! Settings live in one TOML file with three sections:
//!
//! ```toml
//! [ripping]
//! method = "mkv"
//! min_length = 600
//! max_length = 99999
//! mkv_args = ""
//! makemkv_binary = "makemkvcon"
//! update_key_command = "/bin/bash /opt/arm/scripts/update_key.sh"
//!
//! [paths]
//! raw_path = "/home/arm/media/raw"
//! logs_folder = "/home/arm/logs"
//!
//! [logging]
//! level = "info"
//! compact = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use discrip_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new("/etc/discrip/settings.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().ripping.min_length = 900;
//! config.update_section(ConfigSection::Ripping).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, PathSettings, RipSettings, Settings, UNBOUNDED_MAX_LENGTH,
};
