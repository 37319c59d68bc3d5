//! "Save As" handlers.

use std::path::PathBuf;
use std::sync::Arc;

use iced::Task;

use shooter_core::screenshot::{default_file_name, save_as, SaveFormat, ScreenshotError};

use super::{error_chain, run_blocking, Notice};
use crate::app::{Activity, App, Message};

impl App {
    /// "Save As" pressed: ask for a destination.
    pub fn browse_save_target(&mut self) -> Task<Message> {
        if self.activity.is_some() {
            return Task::none();
        }
        self.activity = Some(Activity::Saving);

        let start_dir = self.settings.paths.save_dir.clone();
        let file_name = default_file_name(chrono::Local::now().naive_local());

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title("Save Screenshot As")
                    .add_filter("Images", SaveFormat::EXTENSIONS)
                    .set_file_name(file_name);
                if !start_dir.is_empty() {
                    dialog = dialog.set_directory(&start_dir);
                }
                dialog.save_file().await.map(|f| f.path().to_path_buf())
            },
            Message::SaveTargetChosen,
        )
    }

    /// Destination chosen (or dialog cancelled).
    pub fn handle_save_target_chosen(&mut self, target: Option<PathBuf>) -> Task<Message> {
        let Some(dest) = target else {
            tracing::debug!("Save cancelled");
            self.activity = None;
            return Task::none();
        };

        let source = PathBuf::from(&self.settings.capture.local_path);
        Task::perform(
            run_blocking(move || save_as(&source, &dest).map_err(Arc::new)),
            Message::SaveFinished,
        )
    }

    pub fn handle_save_finished(
        &mut self,
        result: Result<PathBuf, Arc<ScreenshotError>>,
    ) -> Task<Message> {
        self.activity = None;

        match result {
            Ok(path) => {
                if let Some(dir) = path.parent() {
                    self.remember_save_dir(dir.to_string_lossy().into_owned());
                }
                self.show_notice(Notice::success(format!(
                    "Screenshot saved to {}",
                    path.display()
                )))
            }
            Err(e) => {
                tracing::error!("Save failed: {}", error_chain(&*e));
                self.show_notice(Notice::error(format!("Error saving screenshot: {}", e)))
            }
        }
    }

    /// Open the next save dialog where this one saved. Session only.
    fn remember_save_dir(&mut self, dir: String) {
        if dir.is_empty() || dir == self.settings.paths.save_dir {
            return;
        }
        tracing::debug!("Next save dialog opens in {}", dir);
        self.settings.paths.save_dir = dir;
    }
}
