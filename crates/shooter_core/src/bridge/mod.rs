//! Device bridge invocation.
//!
//! All interaction with the external `adb` tool goes through the
//! [`DeviceBridge`] trait. [`AdbBridge`] runs the real executable; tests
//! substitute scripted implementations.
//!
//! # Example
//!
//! ```no_run
//! use shooter_core::bridge::{AdbBridge, DeviceBridge};
//! use shooter_core::devices::DetectionMode;
//!
//! let bridge = AdbBridge::new("adb");
//! let devices = bridge.devices().unwrap();
//! println!("connected: {}", devices.is_connected(DetectionMode::Structured));
//! ```

mod adb;
mod types;

use std::path::Path;

pub use adb::AdbBridge;
pub use types::{BridgeCommand, BridgeError, BridgeResult};

use crate::devices::{parse_device_list, DeviceList};

/// Runs device bridge commands.
///
/// Implementors provide [`run`](DeviceBridge::run); the named operations
/// are built on top of it. Every call blocks until the process exits.
pub trait DeviceBridge: Send + Sync {
    /// Run a command, returning its stdout on a zero exit status.
    fn run(&self, command: &BridgeCommand) -> BridgeResult<String>;

    /// Check that the tool is installed and reachable.
    fn version(&self) -> BridgeResult<String> {
        self.run(&BridgeCommand::Version)
    }

    /// List attached devices.
    fn devices(&self) -> BridgeResult<DeviceList> {
        let output = self.run(&BridgeCommand::Devices)?;
        Ok(parse_device_list(&output))
    }

    /// Take a screenshot on the device, writing it to `remote`.
    fn screencap(&self, remote: &str) -> BridgeResult<()> {
        self.run(&BridgeCommand::Screencap {
            remote: remote.to_string(),
        })?;
        Ok(())
    }

    /// Copy `remote` from the device to `local`.
    fn pull(&self, remote: &str, local: &Path) -> BridgeResult<()> {
        self.run(&BridgeCommand::Pull {
            remote: remote.to_string(),
            local: local.to_path_buf(),
        })?;
        Ok(())
    }

    fn kill_server(&self) -> BridgeResult<()> {
        self.run(&BridgeCommand::KillServer)?;
        Ok(())
    }

    fn start_server(&self) -> BridgeResult<()> {
        self.run(&BridgeCommand::StartServer)?;
        Ok(())
    }

    /// Restart the bridge daemon: kill, then start.
    ///
    /// Stops at the first failure. A failed start after a successful kill
    /// leaves the daemon stopped.
    fn restart(&self) -> BridgeResult<()> {
        self.kill_server()?;
        tracing::debug!("Bridge daemon stopped, starting again");
        self.start_server()?;
        tracing::info!("Bridge daemon restarted");
        Ok(())
    }
}
