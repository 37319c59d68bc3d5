//! ADB Screenshot Shooter - Main entry point
//!
//! Loads the configuration, initializes logging, and launches the iced
//! window.

use std::path::PathBuf;
use std::sync::Arc;

use iced::{window, Size};

use shooter_core::bridge::{AdbBridge, DeviceBridge};
use shooter_core::config::ConfigManager;
use shooter_core::logging::{init_tracing, init_tracing_with_file};

mod app;
mod handlers;
mod pages;
mod theme;

use app::App;

/// Default config path: .config/settings.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

fn main() -> iced::Result {
    // Configuration first: it names the logs folder and level
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let settings = config_manager.settings().clone();
    let logs_dir = config_manager.logs_folder();
    let _log_guard = if settings.logging.file_output {
        init_tracing_with_file(settings.logging.level, &logs_dir)
    } else {
        init_tracing(settings.logging.level);
        None
    };

    tracing::info!("ADB Screenshot Shooter starting");
    tracing::info!("Config: {}", config_manager.path().display());
    tracing::info!(
        "Preview height {} px, status poll every {} ms",
        settings.capture.preview_height,
        settings.window.poll_interval_ms
    );
    tracing::info!("Core version: {}", shooter_core::version());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    let adb = AdbBridge::from_settings(&settings.bridge);
    match adb.serial() {
        Some(serial) => tracing::info!("Bridge: {} (device {})", adb.program().display(), serial),
        None => tracing::info!("Bridge: {}", adb.program().display()),
    }
    let bridge: Arc<dyn DeviceBridge> = Arc::new(adb);

    let window_settings = window::Settings {
        size: Size::new(settings.window.width as f32, settings.window.height as f32),
        resizable: false,
        exit_on_close_request: false,
        ..Default::default()
    };

    iced::application(
        move || App::new(settings.clone(), Arc::clone(&bridge)),
        App::update,
        App::view,
    )
    .title(App::title)
    .subscription(App::subscription)
    .window(window_settings)
    .run()
}
