//! Shooter Core - Backend logic for ADB Screenshot Shooter
//!
//! This crate contains all business logic with zero UI dependencies:
//! invoking the device bridge, interpreting its output, capturing and
//! saving screenshots, and loading configuration.

pub mod bridge;
pub mod capture;
pub mod config;
pub mod devices;
pub mod logging;
pub mod screenshot;
pub mod status;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
