//! Bridge daemon restart.

use std::sync::Arc;

use iced::Task;

use shooter_core::bridge::BridgeError;

use super::{error_chain, run_blocking, Notice};
use crate::app::{Activity, App, Message, PendingAction};

impl App {
    /// "Restart ADB" pressed.
    pub fn restart_bridge(&mut self) -> Task<Message> {
        if self.activity.is_some() || !self.tracker.restart_enabled() {
            return Task::none();
        }
        self.activity = Some(Activity::Restarting);

        if self.poll_in_flight {
            self.pending = Some(PendingAction::Restart);
            return Task::none();
        }
        self.launch_restart()
    }

    pub(crate) fn launch_restart(&mut self) -> Task<Message> {
        let bridge = Arc::clone(&self.bridge);
        tracing::info!("Restarting ADB server");

        Task::perform(
            run_blocking(move || bridge.restart().map_err(Arc::new)),
            Message::RestartFinished,
        )
    }

    pub fn handle_restart_finished(&mut self, result: Result<(), Arc<BridgeError>>) -> Task<Message> {
        self.activity = None;

        match result {
            Ok(()) => self.show_notice(Notice::success("ADB restarted successfully.")),
            Err(e) => {
                tracing::error!("Restart failed: {}", error_chain(&*e));
                self.show_notice(Notice::error("Error while restarting ADB."))
            }
        }
    }
}
