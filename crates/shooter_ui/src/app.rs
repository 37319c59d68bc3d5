//! Main application module for ADB Screenshot Shooter.
//!
//! Holds the window state, the message type and the update/subscription
//! wiring. The action handlers live in `handlers/`, the view in `pages/`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::image;
use iced::{window, Element, Subscription, Task};

use shooter_core::bridge::{BridgeError, DeviceBridge};
use shooter_core::capture::{Capture, CaptureError};
use shooter_core::config::Settings;
use shooter_core::devices::DeviceList;
use shooter_core::screenshot::ScreenshotError;
use shooter_core::status::StatusTracker;

use crate::handlers::Notice;
use crate::pages;

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // Polling
    PollTick,
    PollFinished(Result<DeviceList, Arc<BridgeError>>),

    // Capture
    TakeScreenshot,
    CaptureFinished(Result<Arc<Capture>, Arc<CaptureError>>),

    // Save As
    SaveAs,
    SaveTargetChosen(Option<PathBuf>),
    SaveFinished(Result<PathBuf, Arc<ScreenshotError>>),

    // Restart
    RestartBridge,
    RestartFinished(Result<(), Arc<BridgeError>>),

    // Dialogs and window
    NoticeClosed,
    CloseRequested(window::Id),
}

/// A user action that currently owns the bridge or the screenshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Capturing,
    Saving,
    Restarting,
}

impl Activity {
    /// Whether the action runs bridge commands; polls wait for these.
    pub fn uses_bridge(self) -> bool {
        matches!(self, Self::Capturing | Self::Restarting)
    }

    /// Label shown on the button while the action runs.
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Capturing => "Capturing...",
            Self::Saving => "Saving...",
            Self::Restarting => "Restarting...",
        }
    }
}

/// Action waiting for an in-flight poll to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Capture,
    Restart,
}

/// The displayed screenshot.
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub handle: image::Handle,
}

/// Main application state.
pub struct App {
    pub bridge: Arc<dyn DeviceBridge>,
    /// Settings loaded at startup. Session changes stay in memory.
    pub settings: Settings,

    pub tracker: StatusTracker,
    pub preview: Option<Preview>,

    pub activity: Option<Activity>,
    pub pending: Option<PendingAction>,
    pub poll_in_flight: bool,
    /// The status timer runs while this is set; cleared when the window closes.
    pub polling: bool,

    pub last_notice: Option<Notice>,
}

impl App {
    pub fn new(settings: Settings, bridge: Arc<dyn DeviceBridge>) -> Self {
        tracing::debug!(
            "Polling every {} ms, detection {:?}",
            settings.window.poll_interval_ms,
            settings.bridge.detection
        );

        Self {
            bridge,
            settings,
            tracker: StatusTracker::new(),
            preview: None,
            activity: None,
            pending: None,
            poll_in_flight: false,
            polling: true,
            last_notice: None,
        }
    }

    pub fn title(&self) -> String {
        format!("ADB Screenshot Shooter v{}", shooter_core::version())
    }

    /// Whether the three action buttons accept presses.
    pub fn actions_enabled(&self) -> bool {
        self.activity.is_none()
    }

    pub fn restart_enabled(&self) -> bool {
        self.actions_enabled() && self.tracker.restart_enabled()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollTick => self.handle_poll_tick(),
            Message::PollFinished(result) => self.handle_poll_finished(result),

            Message::TakeScreenshot => self.take_screenshot(),
            Message::CaptureFinished(result) => self.handle_capture_finished(result),

            Message::SaveAs => self.browse_save_target(),
            Message::SaveTargetChosen(target) => self.handle_save_target_chosen(target),
            Message::SaveFinished(result) => self.handle_save_finished(result),

            Message::RestartBridge => self.restart_bridge(),
            Message::RestartFinished(result) => self.handle_restart_finished(result),

            Message::NoticeClosed => Task::none(),
            Message::CloseRequested(id) => {
                tracing::info!("Window {:?} closing, stopping status polling", id);
                self.polling = false;
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        pages::main_window::view(self)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let close = window::close_requests().map(Message::CloseRequested);
        if !self.polling {
            return close;
        }

        let interval = Duration::from_millis(self.settings.window.poll_interval_ms);
        Subscription::batch([
            iced::time::every(interval).map(|_| Message::PollTick),
            close,
        ])
    }
}
