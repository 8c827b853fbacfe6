//! PNG persistence for generated assets

use image::RgbImage;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGB image as PNG, creating parent directories as needed.
///
/// An existing file at `path` is overwritten.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Somewhere finished images can be written to.
pub trait AssetStore: Send + Sync {
    /// Persist `image` under `file_name`, returning where it ended up.
    fn save(&self, image: &RgbImage, file_name: &str) -> Result<PathBuf, OutputError>;
}

/// Store that writes PNG files into one directory.
///
/// The directory is created on first save. Saving the same file name twice
/// replaces the earlier file.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetStore for DirStore {
    fn save(&self, image: &RgbImage, file_name: &str) -> Result<PathBuf, OutputError> {
        let path = self.dir.join(file_name);
        save_png(image, &path)?;
        Ok(path)
    }
}
