//! Screenshot capture workflow.
//!
//! Runs the precondition chain in a fixed order and stops at the first
//! failure:
//!
//! 1. the bridge tool answers `--version`
//! 2. `devices` lists at least one connected device
//! 3. `shell screencap` on the device, then `pull` to the local path
//! 4. the pulled file decodes into a preview

use std::path::PathBuf;

use thiserror::Error;

use crate::bridge::{BridgeError, DeviceBridge};
use crate::config::CaptureSettings;
use crate::devices::{DetectionMode, DeviceList};
use crate::screenshot::{load_preview, PreviewImage, ScreenshotError};

/// Why a capture stopped.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("ADB is not installed or is not on the PATH.")]
    ToolUnavailable(#[source] BridgeError),

    #[error("Error while checking ADB devices.")]
    DeviceQuery(#[source] BridgeError),

    #[error("No Android device is connected.")]
    NoDevice,

    #[error("Error while taking or pulling the screenshot.")]
    Transfer(#[source] BridgeError),

    #[error("Failed to load the captured screenshot: {0}")]
    Preview(#[source] ScreenshotError),
}

/// Where to capture to and how big to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub remote_path: String,
    pub local_path: PathBuf,
    pub preview_height: u32,
}

impl From<&CaptureSettings> for CaptureRequest {
    fn from(settings: &CaptureSettings) -> Self {
        Self {
            remote_path: settings.remote_path.clone(),
            local_path: PathBuf::from(&settings.local_path),
            preview_height: settings.preview_height,
        }
    }
}

/// A completed capture.
#[derive(Debug, Clone)]
pub struct Capture {
    pub local_path: PathBuf,
    pub preview: PreviewImage,
    /// Device list seen by the precondition check.
    pub devices: DeviceList,
}

/// Take a screenshot on the device and pull it to `request.local_path`.
pub fn capture_screenshot(
    bridge: &dyn DeviceBridge,
    request: &CaptureRequest,
    mode: DetectionMode,
) -> Result<Capture, CaptureError> {
    let version = bridge.version().map_err(CaptureError::ToolUnavailable)?;
    tracing::debug!(
        "Bridge tool: {}",
        version.lines().next().unwrap_or_default()
    );

    let devices = bridge.devices().map_err(CaptureError::DeviceQuery)?;
    if !devices.is_connected(mode) {
        tracing::warn!("Capture aborted: no device attached");
        return Err(CaptureError::NoDevice);
    }

    bridge
        .screencap(&request.remote_path)
        .map_err(CaptureError::Transfer)?;
    bridge
        .pull(&request.remote_path, &request.local_path)
        .map_err(CaptureError::Transfer)?;

    let preview = load_preview(&request.local_path, request.preview_height)
        .map_err(CaptureError::Preview)?;

    tracing::info!(
        "Captured {} -> {}",
        request.remote_path,
        request.local_path.display()
    );

    Ok(Capture {
        local_path: request.local_path.clone(),
        preview,
        devices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedBridge};
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    const ATTACHED: &str = "List of devices attached\nemulator-5554\tdevice\n";

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn request(dir: &std::path::Path) -> CaptureRequest {
        CaptureRequest {
            remote_path: "/sdcard/screenshot.png".to_string(),
            local_path: dir.join("screenshot.png"),
            preview_height: 100,
        }
    }

    #[test]
    fn missing_tool_stops_everything() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new().reply("--version", Reply::Missing);

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();

        assert!(matches!(err, CaptureError::ToolUnavailable(_)));
        assert_eq!(bridge.call_names(), vec!["--version"]);
    }

    #[test]
    fn device_query_failure_skips_transfer() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new().reply("devices", Reply::fail(1, "daemon"));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();

        assert!(matches!(err, CaptureError::DeviceQuery(_)));
        assert_eq!(bridge.call_names(), vec!["--version", "devices"]);
    }

    #[test]
    fn no_device_skips_transfer() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out("List of devices attached\n\n"));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();

        assert!(matches!(err, CaptureError::NoDevice));
        assert_eq!(err.to_string(), "No Android device is connected.");
        assert_eq!(bridge.call_names(), vec!["--version", "devices"]);
    }

    #[test]
    fn screencap_failure_skips_pull() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out(ATTACHED))
            .reply("shell screencap", Reply::fail(1, "device offline"));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();

        assert!(matches!(err, CaptureError::Transfer(_)));
        assert_eq!(
            bridge.call_names(),
            vec!["--version", "devices", "shell screencap"]
        );
    }

    #[test]
    fn pull_failure_is_transfer_error() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out(ATTACHED))
            .reply("pull", Reply::fail(1, "remote object does not exist"));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error while taking or pulling the screenshot."
        );
    }

    #[test]
    fn success_produces_preview() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out(ATTACHED))
            .reply("pull", Reply::WriteLocal(png_bytes(50, 200)));

        let req = request(dir.path());
        let capture = capture_screenshot(&bridge, &req, DetectionMode::Structured).unwrap();

        assert_eq!(capture.local_path, req.local_path);
        assert_eq!((capture.preview.width, capture.preview.height), (25, 100));
        assert_eq!(
            bridge.call_names(),
            vec!["--version", "devices", "shell screencap", "pull"]
        );
    }

    #[test]
    fn corrupt_pull_is_preview_error() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out(ATTACHED))
            .reply("pull", Reply::WriteLocal(b"not an image".to_vec()));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Structured)
            .unwrap_err();
        assert!(matches!(err, CaptureError::Preview(_)));
    }

    #[test]
    fn substring_mode_proceeds_on_header_only() {
        let dir = tempdir().unwrap();
        let bridge = ScriptedBridge::new()
            .reply("devices", Reply::out("List of devices attached\n\n"))
            .reply("shell screencap", Reply::fail(1, "no devices/emulators found"));

        let err = capture_screenshot(&bridge, &request(dir.path()), DetectionMode::Substring)
            .unwrap_err();
        assert!(matches!(err, CaptureError::Transfer(_)));
    }
}
