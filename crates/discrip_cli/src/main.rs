//! discrip - MakeMKV disc ripper
//!
//! Runs one rip job against one drive, or inspects saved `makemkvcon -r`
//! output and the settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use discrip_core::config::ConfigManager;
use discrip_core::logging::{init_tracing, LogLevel};
use discrip_core::models::DiscType;

mod commands;

/// discrip - MakeMKV disc ripper
#[derive(Parser, Debug)]
#[command(name = "discrip")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the settings file (created with defaults if missing)
    #[arg(short, long, default_value = "discrip.toml")]
    config: PathBuf,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rip the disc in a drive
    Rip {
        /// Device path of the drive
        #[arg(short, long, default_value = "/dev/sr0")]
        device: String,

        /// Media type (dvd, bluray, music, data)
        #[arg(long, default_value = "dvd")]
        disc_type: DiscType,

        /// Destination title name
        #[arg(short, long)]
        title: String,

        /// Stage token used when the title directory already exists
        /// (defaults to the current UNIX time)
        #[arg(long)]
        stage: Option<String>,

        /// Print the rip report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the track catalog decoded from saved `makemkvcon -r info` output
    Scan {
        /// File holding the captured output
        dump: PathBuf,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Settings file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the settings file, creating it first if needed
    Show,

    /// Change `[ripping]` values, leaving other sections untouched
    SetRipping {
        /// backup or mkv
        #[arg(long)]
        method: Option<String>,

        /// Shortest title to keep, in seconds
        #[arg(long)]
        min_length: Option<u64>,

        /// Longest title to keep, in seconds (99999 = unbounded)
        #[arg(long)]
        max_length: Option<u64>,

        /// Extra `makemkvcon` arguments
        #[arg(long)]
        mkv_args: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::new(&cli.config);
    config
        .load_or_create()
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    init_tracing(cli.log_level.unwrap_or(config.settings().logging.level));
    tracing::debug!("Loaded settings from {}", config.path().display());

    match cli.command {
        Commands::Rip {
            device,
            disc_type,
            title,
            stage,
            json,
        } => {
            let stage = stage.unwrap_or_else(|| chrono::Utc::now().timestamp().to_string());
            commands::rip::run(&config, &device, disc_type, &title, &stage, json)
        }
        Commands::Scan { dump, json } => commands::scan::run(&dump, json),
        Commands::Config(ConfigCommands::Show) => commands::config::show(&config),
        Commands::Config(ConfigCommands::SetRipping {
            method,
            min_length,
            max_length,
            mkv_args,
        }) => commands::config::set_ripping(
            &mut config,
            commands::config::RippingChanges {
                method,
                min_length,
                max_length,
                mkv_args,
            },
        ),
    }
}
