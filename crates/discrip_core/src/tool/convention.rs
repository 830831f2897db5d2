//! Exit code conventions.
//!
//! `makemkvcon` does not follow the usual "zero is success" rule: its info
//! commands exit with 10 on a healthy run, and 253 from the device probe
//! means the beta key has expired. Each call site names the table that
//! applies to it instead of comparing codes inline.

/// Classification of one exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    Ok,
    /// Licence key expired; a key refresh and retry may fix it.
    LicenseExpired,
    Failed,
}

/// A named exit code table for one kind of command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitConvention {
    name: &'static str,
    ok_codes: &'static [i32],
    license_expired: Option<i32>,
}

/// Healthy nominal exit code of MakeMKV info runs.
const INFO_OK: i32 = 10;
/// Probe exit code reported when the key has expired.
const KEY_EXPIRED: i32 = 253;

impl ExitConvention {
    /// Device probe (`info dev:<device>`): 0 and 10 are ok, 253 asks for a key refresh.
    pub const PROBE: Self = Self {
        name: "probe",
        ok_codes: &[0, INFO_OK],
        license_expired: Some(KEY_EXPIRED),
    };

    /// Drive listing and track info: 0 and 10 are ok.
    pub const INFO: Self = Self {
        name: "info",
        ok_codes: &[0, INFO_OK],
        license_expired: None,
    };

    /// Rips, backups and the key refresh script: only 0 is ok.
    pub const STANDARD: Self = Self {
        name: "standard",
        ok_codes: &[0],
        license_expired: None,
    };

    /// Convention name, used in log lines.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Classify an exit code.
    pub fn classify(&self, exit_code: i32) -> ExitClass {
        if self.ok_codes.contains(&exit_code) {
            ExitClass::Ok
        } else if self.license_expired == Some(exit_code) {
            ExitClass::LicenseExpired
        } else {
            ExitClass::Failed
        }
    }
}
