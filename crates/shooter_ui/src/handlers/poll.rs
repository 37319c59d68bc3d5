//! Connection status polling.

use std::sync::Arc;

use iced::Task;

use shooter_core::bridge::BridgeError;
use shooter_core::devices::DeviceList;

use super::{run_blocking, Notice};
use crate::app::{Activity, App, Message, PendingAction};

impl App {
    /// Timer tick: start a device poll unless one is running or an action
    /// owns the bridge.
    pub fn handle_poll_tick(&mut self) -> Task<Message> {
        let bridge_busy = self.activity.is_some_and(Activity::uses_bridge);
        if !self.polling || self.poll_in_flight || bridge_busy {
            return Task::none();
        }
        self.poll_in_flight = true;

        let bridge = Arc::clone(&self.bridge);
        Task::perform(
            run_blocking(move || bridge.devices().map_err(Arc::new)),
            Message::PollFinished,
        )
    }

    /// Poll result: update status, report the first failure of a run, and
    /// start any action that was waiting for the poll to finish. A queued
    /// restart still obeys the restart rule against the fresh status.
    pub fn handle_poll_finished(
        &mut self,
        result: Result<DeviceList, Arc<BridgeError>>,
    ) -> Task<Message> {
        self.poll_in_flight = false;

        let outcome = self.tracker.apply_poll(
            result.as_ref().map_err(|e| &**e),
            self.settings.bridge.detection,
        );

        let notice = match outcome.report {
            Some(message) => self.show_notice(Notice::error(message)),
            None => Task::none(),
        };

        let pending = match self.pending.take() {
            Some(PendingAction::Capture) => self.launch_capture(),
            Some(PendingAction::Restart) if !self.tracker.restart_enabled() => {
                tracing::info!("Device connected while restart was queued, skipping restart");
                self.activity = None;
                Task::none()
            }
            Some(PendingAction::Restart) => self.launch_restart(),
            None => Task::none(),
        };

        Task::batch([notice, pending])
    }
}
