//! OS wallpaper setting.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Failure to apply a wallpaper.
#[derive(Error, Debug)]
pub enum SetterError {
    /// Path cannot be handed to the OS integration
    #[error("Invalid wallpaper path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Downloaded file has no content
    #[error("Saved image file is empty")]
    EmptyImage,

    /// Temporary file could not be written
    #[error("Failed to save image file: {0}")]
    Io(#[from] std::io::Error),

    /// The OS integration refused the image
    #[error("Failed to set wallpaper: {0}")]
    Os(String),
}

/// Applies a local image file as the desktop wallpaper.
pub trait WallpaperSetter: Send + Sync {
    fn set(&self, path: &Path) -> Result<(), SetterError>;
}

/// Production setter backed by the `wallpaper` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsWallpaperSetter;

impl WallpaperSetter for OsWallpaperSetter {
    fn set(&self, path: &Path) -> Result<(), SetterError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| SetterError::InvalidPath(path.to_path_buf()))?;

        info!(path = %path.display(), "Setting wallpaper");
        wallpaper::set_from_path(path_str).map_err(|e| SetterError::Os(e.to_string()))
    }
}

/// Writes `bytes` to a temporary `.jpg` and applies it.
///
/// Blocking; call from `spawn_blocking`. The file is removed on return.
pub fn apply_image(setter: &dyn WallpaperSetter, bytes: &[u8]) -> Result<(), SetterError> {
    if bytes.is_empty() {
        return Err(SetterError::EmptyImage);
    }

    let mut file = tempfile::Builder::new()
        .prefix("wallhunt-")
        .suffix(".jpg")
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;

    info!(path = %file.path().display(), size = bytes.len(), "Image saved");
    setter.set(file.path())
}
