//! `makemkvcon` command lines.

use std::path::Path;

use super::command::ToolCommand;
use crate::config::RipSettings;

/// Disc index that makes `makemkvcon info` list every drive.
const LIST_ALL_DRIVES: &str = "disc:9999";

const PROGRESS_ARGS: [&str; 2] = ["--progress=-stdout", "--messages=-stdout"];

/// Builds `makemkvcon` invocations from [`RipSettings`].
#[derive(Debug, Clone)]
pub struct MakeMkv<'a> {
    settings: &'a RipSettings,
}

impl<'a> MakeMkv<'a> {
    pub fn new(settings: &'a RipSettings) -> Self {
        Self { settings }
    }

    fn base(&self) -> ToolCommand {
        ToolCommand::new(&self.settings.makemkv_binary)
    }

    fn min_length(&self) -> String {
        format!("--minlength={}", self.settings.min_length)
    }

    /// `info dev:<device>`; exits 253 when the key has expired.
    pub fn probe(&self, device_path: &str) -> ToolCommand {
        self.base().arg("info").arg(format!("dev:{}", device_path))
    }

    /// `-r info disc:9999`, whose `DRV:` lines map devices to disc indexes.
    pub fn drive_list(&self) -> ToolCommand {
        self.base().arg("-r").arg("info").arg(LIST_ALL_DRIVES)
    }

    /// Robot-mode title listing for one disc.
    pub fn track_info(&self, disc_index: u32) -> ToolCommand {
        self.base()
            .arg("-r")
            .args(PROGRESS_ARGS)
            .arg(self.min_length())
            .arg("--cache=1")
            .arg("info")
            .arg(format!("disc:{}", disc_index))
    }

    /// Decrypted whole-disc backup.
    pub fn backup(&self, disc_index: u32, raw_path: &Path) -> ToolCommand {
        self.base()
            .arg("backup")
            .arg(self.min_length())
            .arg("--decrypt")
            .args(self.settings.extra_args())
            .arg("-r")
            .arg(format!("disc:{}", disc_index))
            .arg(raw_path.display().to_string())
    }

    /// MKV rip of every title at or above the minimum length.
    pub fn rip_all(&self, device_path: &str, raw_path: &Path) -> ToolCommand {
        self.rip(device_path, "all", raw_path)
    }

    /// MKV rip of one title.
    pub fn rip_title(&self, device_path: &str, track_number: u32, raw_path: &Path) -> ToolCommand {
        self.rip(device_path, &track_number.to_string(), raw_path)
    }

    fn rip(&self, device_path: &str, selection: &str, raw_path: &Path) -> ToolCommand {
        self.base()
            .arg("mkv")
            .args(self.settings.extra_args())
            .arg("-r")
            .args(PROGRESS_ARGS)
            .arg(format!("dev:{}", device_path))
            .arg(selection)
            .arg(raw_path.display().to_string())
            .arg(self.min_length())
    }

    /// The configured key refresh, or `None` when disabled.
    pub fn update_key(&self) -> Option<ToolCommand> {
        ToolCommand::from_line(&self.settings.update_key_command)
    }
}
