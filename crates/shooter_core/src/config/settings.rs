//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::devices::DetectionMode;
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How to invoke the device bridge.
    #[serde(default)]
    pub bridge: BridgeSettings,

    /// Screenshot locations and preview size.
    #[serde(default)]
    pub capture: CaptureSettings,

    /// Window geometry and polling.
    #[serde(default)]
    pub window: WindowSettings,

    /// Log folder and remembered paths.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Identifies one TOML table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Bridge,
    Capture,
    Window,
    Paths,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Bridge,
        ConfigSection::Capture,
        ConfigSection::Window,
        ConfigSection::Paths,
        ConfigSection::Logging,
    ];

    /// TOML table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Bridge => "bridge",
            ConfigSection::Capture => "capture",
            ConfigSection::Window => "window",
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the table.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Bridge => "# Device bridge (adb) invocation",
            ConfigSection::Capture => "# Screenshot locations and preview size",
            ConfigSection::Window => "# Window geometry and status polling",
            ConfigSection::Paths => "# Logs and the initial Save As folder",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}

/// Device bridge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// adb executable; a bare name is looked up on PATH.
    #[serde(default = "default_program")]
    pub program: String,

    /// Device serial passed with `-s`; empty lets adb choose.
    #[serde(default)]
    pub serial: String,

    /// How `adb devices` output decides "connected".
    #[serde(default)]
    pub detection: DetectionMode,
}

fn default_program() -> String {
    "adb".to_string()
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            serial: String::new(),
            detection: DetectionMode::default(),
        }
    }
}

/// Capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Path on the device that screencap writes to.
    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    /// Local file the screenshot is pulled to (overwritten every capture).
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Preview height in pixels.
    #[serde(default = "default_preview_height")]
    pub preview_height: u32,
}

fn default_remote_path() -> String {
    "/sdcard/screenshot.png".to_string()
}

fn default_local_path() -> String {
    "screenshot.png".to_string()
}

fn default_preview_height() -> u32 {
    750
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            remote_path: default_remote_path(),
            local_path: default_local_path(),
            preview_height: default_preview_height(),
        }
    }
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Connection poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    900
}

fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Path configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Folder the "Save As" dialog opens in; empty lets the dialog choose.
    ///
    /// Read at startup only. The folder of later saves is remembered in
    /// memory for the session and never written back.
    #[serde(default)]
    pub save_dir: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            save_dir: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is unset.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write a daily log file into the logs folder.
    #[serde(default = "default_true")]
    pub file_output: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            file_output: true,
        }
    }
}
