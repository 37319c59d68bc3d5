//! Connection status tracking for the periodic poll.

use std::fmt;

use crate::bridge::BridgeError;
use crate::devices::{DetectionMode, DeviceList};

/// Message shown when listing devices fails.
pub const DEVICE_QUERY_FAILED: &str = "Error while checking ADB devices.";

/// Two-valued connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    /// Status label text.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "ADB status: Connected",
            ConnectionStatus::Disconnected => "ADB status: Not Connected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("connected"),
            ConnectionStatus::Disconnected => f.write_str("disconnected"),
        }
    }
}

/// Result of feeding one poll into the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// The status differs from the one before this poll.
    pub changed: bool,
    /// Error text to show the user, if this poll should raise a dialog.
    pub report: Option<String>,
}

/// Tracks the connection status across polls.
///
/// A failed poll leaves the status as it was. Only the first failure of
/// an uninterrupted run of failures is reported.
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    status: Option<ConnectionStatus>,
    failing: bool,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status; `None` before the first successful poll.
    pub fn status(&self) -> Option<ConnectionStatus> {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == Some(ConnectionStatus::Connected)
    }

    /// Whether the "restart bridge" action should be enabled.
    pub fn restart_enabled(&self) -> bool {
        !self.is_connected()
    }

    /// Label text for the status widget.
    pub fn label(&self) -> &'static str {
        match self.status {
            Some(status) => status.label(),
            None => "ADB connection status: Not Connected",
        }
    }

    /// Apply the result of one `adb devices` call.
    pub fn apply_poll(
        &mut self,
        result: Result<&DeviceList, &BridgeError>,
        mode: DetectionMode,
    ) -> PollOutcome {
        match result {
            Ok(list) => {
                self.failing = false;
                let next = ConnectionStatus::from_connected(list.is_connected(mode));
                PollOutcome {
                    changed: self.set(next),
                    report: None,
                }
            }
            Err(e) => {
                let first = !self.failing;
                self.failing = true;
                if first {
                    tracing::warn!("Device poll failed: {}", e);
                }
                PollOutcome {
                    changed: false,
                    report: first.then(|| DEVICE_QUERY_FAILED.to_string()),
                }
            }
        }
    }

    /// Force the status to connected (after a successful capture).
    pub fn mark_connected(&mut self) -> bool {
        self.set(ConnectionStatus::Connected)
    }

    fn set(&mut self, next: ConnectionStatus) -> bool {
        let changed = self.status != Some(next);
        if changed {
            tracing::info!("Connection status: {}", next);
        }
        self.status = Some(next);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::parse_device_list;

    fn attached() -> DeviceList {
        parse_device_list("List of devices attached\nemulator-5554\tdevice\n")
    }

    fn empty() -> DeviceList {
        parse_device_list("List of devices attached\n\n")
    }

    fn failure() -> BridgeError {
        BridgeError::command_failed("adb devices", 1, "cannot connect to daemon")
    }

    #[test]
    fn starts_unknown_with_restart_enabled() {
        let tracker = StatusTracker::new();
        assert_eq!(tracker.status(), None);
        assert!(tracker.restart_enabled());
        assert_eq!(tracker.label(), "ADB connection status: Not Connected");
    }

    #[test]
    fn connected_disables_restart() {
        let mut tracker = StatusTracker::new();
        let outcome = tracker.apply_poll(Ok(&attached()), DetectionMode::Structured);
        assert!(outcome.changed);
        assert!(tracker.is_connected());
        assert!(!tracker.restart_enabled());
        assert_eq!(tracker.label(), "ADB status: Connected");
    }

    #[test]
    fn disconnected_enables_restart() {
        let mut tracker = StatusTracker::new();
        tracker.apply_poll(Ok(&attached()), DetectionMode::Structured);
        let outcome = tracker.apply_poll(Ok(&empty()), DetectionMode::Structured);
        assert!(outcome.changed);
        assert!(tracker.restart_enabled());
        assert_eq!(tracker.label(), "ADB status: Not Connected");
    }

    #[test]
    fn repeated_identical_polls_are_idempotent() {
        let mut tracker = StatusTracker::new();
        let list = attached();
        tracker.apply_poll(Ok(&list), DetectionMode::Structured);
        for _ in 0..5 {
            let outcome = tracker.apply_poll(Ok(&list), DetectionMode::Structured);
            assert_eq!(outcome, PollOutcome::default());
        }
        assert!(tracker.is_connected());
    }

    #[test]
    fn substring_mode_reports_header_as_connected() {
        let mut tracker = StatusTracker::new();
        tracker.apply_poll(Ok(&empty()), DetectionMode::Substring);
        assert!(tracker.is_connected());
    }

    #[test]
    fn failure_reported_once_per_run() {
        let mut tracker = StatusTracker::new();
        tracker.apply_poll(Ok(&attached()), DetectionMode::Structured);

        let err = failure();
        let first = tracker.apply_poll(Err(&err), DetectionMode::Structured);
        assert_eq!(first.report.as_deref(), Some(DEVICE_QUERY_FAILED));
        assert!(!first.changed);

        let second = tracker.apply_poll(Err(&err), DetectionMode::Structured);
        assert_eq!(second.report, None);
        assert!(tracker.is_connected(), "failed poll keeps previous status");

        tracker.apply_poll(Ok(&attached()), DetectionMode::Structured);
        let again = tracker.apply_poll(Err(&err), DetectionMode::Structured);
        assert!(again.report.is_some(), "a new run of failures reports again");
    }

    #[test]
    fn mark_connected_after_capture() {
        let mut tracker = StatusTracker::new();
        assert!(tracker.mark_connected());
        assert!(!tracker.mark_connected());
        assert!(!tracker.restart_enabled());
    }
}
