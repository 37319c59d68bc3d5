//! Main window view.
//!
//! Status label on top, the screenshot preview below it, and the three
//! action buttons stacked at the bottom.

use iced::widget::{button, column, container, image, text};
use iced::{Color, Element, Length};

use shooter_core::status::ConnectionStatus;

use crate::app::{Activity, App, Message};
use crate::theme::{colors, font, spacing};

/// Build the main window view.
pub fn view(app: &App) -> Element<'_, Message> {
    let content = column![
        status_label(app),
        preview_area(app),
        action_buttons(app),
    ]
    .spacing(spacing::MD)
    .padding(spacing::LG);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn status_label(app: &App) -> Element<'_, Message> {
    let color = status_color(app.tracker.status());

    container(text(app.tracker.label()).size(font::LG).color(color))
        .center_x(Length::Fill)
        .into()
}

fn status_color(status: Option<ConnectionStatus>) -> Color {
    match status {
        Some(ConnectionStatus::Connected) => colors::CONNECTED,
        Some(ConnectionStatus::Disconnected) => colors::DISCONNECTED,
        None => colors::UNKNOWN,
    }
}

/// The last captured screenshot, or a placeholder before the first capture.
fn preview_area(app: &App) -> Element<'_, Message> {
    let body: Element<'_, Message> = match &app.preview {
        Some(preview) => image(preview.handle.clone())
            .width(Length::Fixed(preview.width as f32))
            .height(Length::Fixed(preview.height as f32))
            .into(),
        None => text("Screenshot preview")
            .size(font::NORMAL)
            .color(colors::TEXT_MUTED)
            .into(),
    };

    container(body)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn action_buttons(app: &App) -> Element<'_, Message> {
    let idle = app.actions_enabled();

    column![
        action_button(
            label_for(app, Activity::Capturing, "Take Screenshot"),
            idle.then_some(Message::TakeScreenshot),
        ),
        action_button(
            label_for(app, Activity::Saving, "Save As"),
            idle.then_some(Message::SaveAs),
        ),
        action_button(
            label_for(app, Activity::Restarting, "Restart ADB"),
            app.restart_enabled().then_some(Message::RestartBridge),
        ),
    ]
    .spacing(spacing::SM)
    .into()
}

/// Button label, swapped for a progress label while its action runs.
fn label_for(app: &App, activity: Activity, idle_label: &'static str) -> &'static str {
    if app.activity == Some(activity) {
        activity.busy_label()
    } else {
        idle_label
    }
}

fn action_button<'a>(label: &'a str, on_press: Option<Message>) -> Element<'a, Message> {
    button(
        text(label)
            .size(font::NORMAL)
            .width(Length::Fill)
            .align_x(iced::Center),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::LG])
    .on_press_maybe(on_press)
    .into()
}
