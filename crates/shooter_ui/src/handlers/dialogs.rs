//! Modal message dialogs.

use iced::Task;
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::app::{App, Message};

/// Dialog severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message for the user, shown as a native modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "Success",
            NoticeLevel::Error => "Error",
        }
    }
}

impl App {
    /// Show a notice and remember it as the latest one.
    pub fn show_notice(&mut self, notice: Notice) -> Task<Message> {
        match notice.level {
            NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Error => tracing::warn!("{}", notice.message),
        }
        self.last_notice = Some(notice.clone());

        Task::perform(
            async move {
                let level = match notice.level {
                    NoticeLevel::Success => MessageLevel::Info,
                    NoticeLevel::Error => MessageLevel::Error,
                };
                AsyncMessageDialog::new()
                    .set_level(level)
                    .set_title(notice.title())
                    .set_description(&notice.message)
                    .set_buttons(MessageButtons::Ok)
                    .show()
                    .await;
            },
            |_| Message::NoticeClosed,
        )
    }
}
