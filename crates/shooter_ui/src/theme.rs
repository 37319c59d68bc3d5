//! Theme configuration for ADB Screenshot Shooter.
//!
//! Spacing, font sizes and the few custom colors used by the main window.

use iced::Color;

/// Application colors.
pub mod colors {
    use super::Color;

    /// Status label when a device is attached
    pub const CONNECTED: Color = Color::from_rgb(0.20, 0.55, 0.25);

    /// Status label when nothing is attached
    pub const DISCONNECTED: Color = Color::from_rgb(0.70, 0.22, 0.22);

    /// Status label before the first poll
    pub const UNKNOWN: Color = Color::from_rgb(0.45, 0.45, 0.45);

    /// Placeholder text in the empty preview
    pub const TEXT_MUTED: Color = Color::from_rgb(0.40, 0.40, 0.40);
}

/// Spacing constants.
pub mod spacing {
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
    /// Large spacing (16px)
    pub const LG: f32 = 16.0;
}

/// Font sizes.
pub mod font {
    /// Normal text
    pub const NORMAL: f32 = 15.0;
    /// Large text (status)
    pub const LG: f32 = 18.0;
}
