//! Slide image discovery.

use nanoslides_error::{ExportError, ExportErrorKind};
use std::path::{Path, PathBuf};

/// Image extensions picked up from a slides directory (lower-case).
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Image files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// - `MissingDirectory` if `dir` does not exist
/// - `NotADirectory` if it is a file
/// - `NoImages` if it holds no supported image
#[tracing::instrument(fields(dir = %dir.display()))]
pub fn list_slide_images(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if !dir.exists() {
        return Err(ExportError::new(ExportErrorKind::MissingDirectory(
            dir.display().to_string(),
        )));
    }
    if !dir.is_dir() {
        return Err(ExportError::new(ExportErrorKind::NotADirectory(
            dir.display().to_string(),
        )));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| ExportError::new(ExportErrorKind::MissingDirectory(format!("{}: {}", dir.display(), e))))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if images.is_empty() {
        return Err(ExportError::new(ExportErrorKind::NoImages(
            dir.display().to_string(),
        )));
    }
    tracing::debug!(count = images.len(), "Found slide images");
    Ok(images)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
