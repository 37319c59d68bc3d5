//! Screenshot image handling: preview scaling and save-as re-encoding.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Errors from reading or writing screenshot images.
#[derive(Error, Debug)]
pub enum ScreenshotError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported image format '.{0}' (use .png or .jpg)")]
    UnsupportedFormat(String),

    #[error("Image has zero width or height")]
    EmptyImage,
}

/// Result type for screenshot operations.
pub type ScreenshotResult<T> = Result<T, ScreenshotError>;

/// Scaled RGBA pixels ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// Output encodings offered by the save dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
}

impl SaveFormat {
    /// Extensions accepted by the save dialog filter.
    pub const EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg"];

    /// Pick the format from a path's extension.
    ///
    /// Returns `Ok(None)` when the path has no extension.
    pub fn from_path(path: &Path) -> ScreenshotResult<Option<Self>> {
        let Some(ext) = path.extension() else {
            return Ok(None);
        };
        let ext = ext.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(Some(SaveFormat::Png)),
            "jpg" | "jpeg" => Ok(Some(SaveFormat::Jpeg)),
            _ => Err(ScreenshotError::UnsupportedFormat(ext)),
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Dimensions after scaling to `target_height`, keeping the aspect ratio.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    target_height: u32,
) -> ScreenshotResult<(u32, u32)> {
    if width == 0 || height == 0 || target_height == 0 {
        return Err(ScreenshotError::EmptyImage);
    }
    let scaled = (f64::from(width) * f64::from(target_height) / f64::from(height)).round();
    Ok(((scaled as u32).max(1), target_height))
}

fn open(path: &Path) -> ScreenshotResult<DynamicImage> {
    image::open(path).map_err(|source| ScreenshotError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a screenshot and scale it to `target_height` for display.
///
/// The image is always resized to the target height, upscaling small
/// images as well.
pub fn load_preview(path: &Path, target_height: u32) -> ScreenshotResult<PreviewImage> {
    let img = open(path)?;
    let (width, height) = scaled_dimensions(img.width(), img.height(), target_height)?;

    tracing::debug!(
        "Scaling {} from {}x{} to {}x{}",
        path.display(),
        img.width(),
        img.height(),
        width,
        height
    );

    let rgba = img
        .resize_exact(width, height, FilterType::Triangle)
        .into_rgba8();

    Ok(PreviewImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// Re-encode `source` into `dest`, choosing the format from the extension.
///
/// A destination without an extension gets `.png`. Returns the path that
/// was written.
pub fn save_as(source: &Path, dest: &Path) -> ScreenshotResult<PathBuf> {
    let (format, dest) = match SaveFormat::from_path(dest)? {
        Some(format) => (format, dest.to_path_buf()),
        None => (SaveFormat::Png, dest.with_extension("png")),
    };

    let img = open(source)?;
    let img = match format {
        SaveFormat::Png => img,
        // JPEG has no alpha channel.
        SaveFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
    };

    img.save_with_format(&dest, format.image_format())
        .map_err(|source| ScreenshotError::Write {
            path: dest.clone(),
            source,
        })?;

    tracing::info!("Saved screenshot {} to {}", source.display(), dest.display());
    Ok(dest)
}

/// Default name offered by the save dialog.
pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("screenshot_{}.png", now.format("%Y%m%d_%H%M%S"))
}
