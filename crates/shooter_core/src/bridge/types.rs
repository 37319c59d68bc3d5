//! Bridge command and error types.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single invocation of the device bridge tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    /// `adb --version`
    Version,
    /// `adb devices`
    Devices,
    /// `adb shell screencap <remote>`
    Screencap { remote: String },
    /// `adb pull <remote> <local>`
    Pull { remote: String, local: PathBuf },
    /// `adb kill-server`
    KillServer,
    /// `adb start-server`
    StartServer,
}

impl BridgeCommand {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeCommand::Version => "--version",
            BridgeCommand::Devices => "devices",
            BridgeCommand::Screencap { .. } => "shell screencap",
            BridgeCommand::Pull { .. } => "pull",
            BridgeCommand::KillServer => "kill-server",
            BridgeCommand::StartServer => "start-server",
        }
    }

    /// Argument vector passed to the tool (without the program itself).
    pub fn args(&self) -> Vec<OsString> {
        match self {
            BridgeCommand::Version => vec!["--version".into()],
            BridgeCommand::Devices => vec!["devices".into()],
            BridgeCommand::Screencap { remote } => {
                vec!["shell".into(), "screencap".into(), remote.into()]
            }
            BridgeCommand::Pull { remote, local } => {
                vec!["pull".into(), remote.into(), local.clone().into_os_string()]
            }
            BridgeCommand::KillServer => vec!["kill-server".into()],
            BridgeCommand::StartServer => vec!["start-server".into()],
        }
    }

    /// Whether the command talks to a specific device (and so honours `-s`).
    pub fn targets_device(&self) -> bool {
        matches!(
            self,
            BridgeCommand::Screencap { .. } | BridgeCommand::Pull { .. }
        )
    }
}

impl fmt::Display for BridgeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        write!(f, "{}", args.join(" "))
    }
}

/// Errors from invoking the device bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The program could not be found.
    #[error("{program} was not found. Is it installed and on the PATH?")]
    ToolNotFound { program: String },

    /// The program exists but could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and exited non-zero.
    #[error("`{command}` failed with exit code {exit_code}: {message}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        message: String,
    },
}

impl BridgeError {
    /// Create a command failed error.
    pub fn command_failed(
        command: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            message: message.into(),
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
