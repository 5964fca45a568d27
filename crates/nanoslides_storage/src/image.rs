//! Generated slide image files.

use chrono::Utc;
use nanoslides_core::SlideResult;
use nanoslides_error::{NanoslidesResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Writes engine output to disk and names it after its slide.
///
/// # Examples
///
/// ```no_run
/// use nanoslides_core::{SlideMetadata, SlideResult};
/// use nanoslides_storage::ImageStore;
///
/// # async fn example() -> nanoslides_error::NanoslidesResult<()> {
/// let store = ImageStore::new("./slides");
/// let result = SlideResult::new(vec![0x89, 0x50], "image/png", "Intro", SlideMetadata::default());
/// let path = store.persist(&result, "slide").await?;
/// let path = store.rename_for_slide(&path, 1, "intro").await?;
/// assert!(path.ends_with("1_intro.png"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImageStore {
    output_dir: PathBuf,
}

impl ImageStore {
    /// Store writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory images are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write an engine result as `{prefix}-{timestamp}.{ext}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the result carries no bytes or the write fails.
    #[instrument(skip(self, result), fields(dir = %self.output_dir.display()))]
    pub async fn persist(&self, result: &SlideResult, prefix: &str) -> NanoslidesResult<PathBuf> {
        if result.image_bytes().is_empty() {
            return Err(StorageError::new(StorageErrorKind::FileWrite(
                "engine returned an empty image".to_string(),
            ))
            .into());
        }

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.output_dir.display(),
                e
            )))
        })?;

        let stamp = Utc::now().format("%Y%m%dT%H%M%S%6fZ");
        let path = self
            .output_dir
            .join(format!("{}-{}.{}", prefix, stamp, result.extension()));

        fs::write(&path, result.image_bytes()).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        info!(
            path = %path.display(),
            bytes = result.image_bytes().len(),
            "Saved slide image"
        );
        Ok(path)
    }

    /// Rename an image to `{order}_{id}.{ext}` in the same directory.
    ///
    /// A taken name gets `-2`, `-3`, ... appended. Renaming a file onto its
    /// own name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn rename_for_slide(
        &self,
        path: &Path,
        order: u32,
        id: &str,
    ) -> NanoslidesResult<PathBuf> {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("png");
        let stem = format!("{}_{}", order, id);

        let mut target = dir.join(format!("{}.{}", stem, ext));
        let mut counter = 2;
        while target != path && fs::try_exists(&target).await.unwrap_or(false) {
            target = dir.join(format!("{}-{}.{}", stem, counter, ext));
            counter += 1;
        }

        if target == path {
            return Ok(target);
        }

        fs::rename(path, &target).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                path.display(),
                target.display(),
                e
            )))
        })?;

        debug!(target = %target.display(), "Renamed slide image");
        Ok(target)
    }

    /// Read an image file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is missing, `FileRead` otherwise.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub async fn read(path: &Path) -> NanoslidesResult<Vec<u8>> {
        fs::read(path).await.map_err(|e| {
            let kind = if e.kind() == std::io::ErrorKind::NotFound {
                StorageErrorKind::NotFound(path.display().to_string())
            } else {
                StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))
            };
            StorageError::new(kind).into()
        })
    }
}
