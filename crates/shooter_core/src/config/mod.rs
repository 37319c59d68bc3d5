//! Configuration management for ADB Screenshot Shooter.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults filled in for missing keys on load
//!
//! # Example
//!
//! ```no_run
//! use shooter_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("adb: {}", config.settings().bridge.program);
//!
//! config.settings_mut().bridge.serial = "emulator-5554".to_string();
//! config.update_section(ConfigSection::Bridge).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    BridgeSettings, CaptureSettings, ConfigSection, LoggingSettings, PathSettings, Settings,
    WindowSettings,
};
