//! `adb` command wrapper.
//!
//! Runs each bridge command as a child process and maps the exit status
//! into [`BridgeError`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{BridgeCommand, BridgeError, BridgeResult};
use super::DeviceBridge;
use crate::config::BridgeSettings;

/// Device bridge backed by the real `adb` executable.
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
    serial: Option<String>,
}

impl AdbBridge {
    /// Create a bridge that runs `program` (a bare name is looked up on PATH).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            serial: None,
        }
    }

    /// Target a specific device serial for `shell` and `pull`.
    ///
    /// An empty serial clears the target.
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        let serial = serial.into();
        self.serial = if serial.trim().is_empty() {
            None
        } else {
            Some(serial.trim().to_string())
        };
        self
    }

    /// Build a bridge from the `[bridge]` settings section.
    pub fn from_settings(settings: &BridgeSettings) -> Self {
        Self::new(&settings.program).with_serial(settings.serial.clone())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn serial(&self) -> Option<&str> {
        self.serial.as_deref()
    }

    fn build_command(&self, command: &BridgeCommand) -> Command {
        let mut cmd = Command::new(&self.program);
        if let (Some(serial), true) = (&self.serial, command.targets_device()) {
            cmd.arg("-s").arg(serial);
        }
        cmd.args(command.args());
        cmd
    }

    fn command_line(&self, command: &BridgeCommand) -> String {
        match (&self.serial, command.targets_device()) {
            (Some(serial), true) => {
                format!("{} -s {} {}", self.program.display(), serial, command)
            }
            _ => format!("{} {}", self.program.display(), command),
        }
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new("adb")
    }
}

impl DeviceBridge for AdbBridge {
    fn run(&self, command: &BridgeCommand) -> BridgeResult<String> {
        let command_line = self.command_line(command);
        tracing::debug!("Running: {}", command_line);

        let output = self.build_command(command).output().map_err(|e| {
            let program = self.program.display().to_string();
            if e.kind() == ErrorKind::NotFound {
                BridgeError::ToolNotFound { program }
            } else {
                BridgeError::Spawn { program, source: e }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let exit_code = output.status.code().unwrap_or(-1);
            tracing::warn!("{} exited with code {}", command_line, exit_code);
            return Err(BridgeError::command_failed(
                command_line,
                exit_code,
                stderr.trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn serial_only_applies_to_device_commands() {
        let bridge = AdbBridge::new("adb").with_serial("emulator-5554");

        let pull = bridge.build_command(&BridgeCommand::Pull {
            remote: "/sdcard/screenshot.png".to_string(),
            local: PathBuf::from("screenshot.png"),
        });
        assert_eq!(
            args_of(&pull),
            vec!["-s", "emulator-5554", "pull", "/sdcard/screenshot.png", "screenshot.png"]
        );

        let devices = bridge.build_command(&BridgeCommand::Devices);
        assert_eq!(args_of(&devices), vec!["devices"]);
    }

    #[test]
    fn blank_serial_is_ignored() {
        let bridge = AdbBridge::new("adb").with_serial("   ");
        assert_eq!(bridge.serial(), None);
    }

    #[test]
    fn missing_program_is_tool_not_found() {
        let bridge = AdbBridge::new("definitely-not-a-real-adb-binary-4f1c");
        let err = bridge.run(&BridgeCommand::Version).unwrap_err();
        assert!(matches!(err, BridgeError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_command_failed() {
        let bridge = AdbBridge::new("false");
        let err = bridge.run(&BridgeCommand::Devices).unwrap_err();
        match err {
            BridgeError::CommandFailed { exit_code, .. } => assert_eq!(exit_code, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_returns_stdout() {
        let bridge = AdbBridge::new("echo");
        let out = bridge.run(&BridgeCommand::Devices).unwrap();
        assert_eq!(out.trim(), "devices");
    }
}
