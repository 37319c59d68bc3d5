//! Screenshot capture handlers.

use std::sync::Arc;

use iced::widget::image;
use iced::Task;

use shooter_core::capture::{capture_screenshot, Capture, CaptureError, CaptureRequest};

use super::{error_chain, run_blocking, Notice};
use crate::app::{Activity, App, Message, PendingAction, Preview};

impl App {
    /// "Take Screenshot" pressed.
    pub fn take_screenshot(&mut self) -> Task<Message> {
        if self.activity.is_some() {
            return Task::none();
        }
        self.activity = Some(Activity::Capturing);

        if self.poll_in_flight {
            // Runs from handle_poll_finished so the two never interleave.
            self.pending = Some(PendingAction::Capture);
            return Task::none();
        }
        self.launch_capture()
    }

    pub(crate) fn launch_capture(&mut self) -> Task<Message> {
        let bridge = Arc::clone(&self.bridge);
        let request = CaptureRequest::from(&self.settings.capture);
        let mode = self.settings.bridge.detection;

        tracing::info!("Capturing screenshot to {}", request.local_path.display());

        Task::perform(
            run_blocking(move || {
                capture_screenshot(&*bridge, &request, mode)
                    .map(Arc::new)
                    .map_err(Arc::new)
            }),
            Message::CaptureFinished,
        )
    }

    /// Capture finished: show the preview or the failure.
    pub fn handle_capture_finished(
        &mut self,
        result: Result<Arc<Capture>, Arc<CaptureError>>,
    ) -> Task<Message> {
        self.activity = None;

        match result {
            Ok(capture) => {
                let capture = Arc::unwrap_or_clone(capture);
                let serials: Vec<&str> = capture
                    .devices
                    .attached()
                    .map(|entry| entry.serial.as_str())
                    .collect();
                tracing::info!(
                    "Screenshot {} captured (devices: {})",
                    capture.local_path.display(),
                    serials.join(", ")
                );
                let preview = capture.preview;
                self.preview = Some(Preview {
                    width: preview.width,
                    height: preview.height,
                    handle: image::Handle::from_rgba(preview.width, preview.height, preview.rgba),
                });
                self.tracker.mark_connected();
                Task::none()
            }
            Err(e) => {
                tracing::error!("Capture failed: {}", error_chain(&*e));
                self.show_notice(Notice::error(e.to_string()))
            }
        }
    }
}
