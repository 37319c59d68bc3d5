//! Parsing of `adb devices` output.
//!
//! The output looks like:
//!
//! ```text
//! * daemon not running; starting now at tcp:5037
//! * daemon started successfully
//! List of devices attached
//! emulator-5554	device
//! R58M12ABCDE	unauthorized
//! 0123456789	no permissions (user in plugdev group; are your udev rules wrong?)
//! ```
//!
//! Each device line is `serial <whitespace> state [extra...]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a device list is turned into a connected/disconnected verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Connected when at least one entry is in the `device` state.
    #[default]
    Structured,
    /// Connected when the raw output contains the substring `device`.
    ///
    /// This also matches the `List of devices attached` header, so it
    /// reports connected even with nothing attached.
    Substring,
}

/// State column of a device line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Device,
    Offline,
    Unauthorized,
    Authorizing,
    Recovery,
    Sideload,
    Bootloader,
    NoPermissions,
    Other(String),
}

impl DeviceState {
    fn parse(token: &str) -> Self {
        match token {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            "authorizing" => DeviceState::Authorizing,
            "recovery" => DeviceState::Recovery,
            "sideload" => DeviceState::Sideload,
            "bootloader" => DeviceState::Bootloader,
            other => DeviceState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceState::Device => "device",
            DeviceState::Offline => "offline",
            DeviceState::Unauthorized => "unauthorized",
            DeviceState::Authorizing => "authorizing",
            DeviceState::Recovery => "recovery",
            DeviceState::Sideload => "sideload",
            DeviceState::Bootloader => "bootloader",
            DeviceState::NoPermissions => "no permissions",
            DeviceState::Other(s) => s,
        };
        f.write_str(s)
    }
}

/// One `(serial, state)` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub serial: String,
    pub state: DeviceState,
}

/// Parsed `adb devices` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceList {
    pub entries: Vec<DeviceEntry>,
    /// Unmodified tool output, kept for substring detection.
    pub raw: String,
}

impl DeviceList {
    /// Entries that are ready for shell/pull.
    pub fn attached(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.entries
            .iter()
            .filter(|e| e.state == DeviceState::Device)
    }

    pub fn is_connected(&self, mode: DetectionMode) -> bool {
        match mode {
            DetectionMode::Structured => self.attached().next().is_some(),
            DetectionMode::Substring => self.raw.contains("device"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the output of `adb devices` (with or without `-l`).
pub fn parse_device_list(output: &str) -> DeviceList {
    let entries = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("List of devices"))
        .filter(|line| !line.starts_with('*'))
        .filter_map(parse_line)
        .collect();

    DeviceList {
        entries,
        raw: output.to_string(),
    }
}

fn parse_line(line: &str) -> Option<DeviceEntry> {
    let mut tokens = line.split_whitespace();
    let serial = tokens.next()?;
    let state = match tokens.next()? {
        "no" if tokens.next() == Some("permissions") => DeviceState::NoPermissions,
        token => DeviceState::parse(token),
    };

    Some(DeviceEntry {
        serial: serial.to_string(),
        state,
    })
}
