//! Text reference files injected into prompts.

use nanoslides_core::normalize_reference_path;
use nanoslides_error::{StorageError, StorageErrorKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Characters kept from each reference file.
pub const MAX_REFERENCE_FILE_CHARS: usize = 12_000;

const TRUNCATION_NOTE: &str = "\n[...truncated...]";

/// A reference file read for prompt injection.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ReferenceFile {
    /// Resolved path
    path: PathBuf,
    /// Decoded text, cut to [`MAX_REFERENCE_FILE_CHARS`]
    content: String,
    /// Whether `content` was cut
    truncated: bool,
}

impl ReferenceFile {
    /// Decode file bytes as text.
    ///
    /// Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the bytes contain a NUL, which marks the
    /// file as binary.
    #[track_caller]
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self, StorageError> {
        let path = path.into();
        if bytes.contains(&0) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "Reference file appears to be binary and cannot be used: {}",
                path.display()
            ))));
        }

        let decoded = String::from_utf8_lossy(bytes);
        let (content, truncated) = match decoded.char_indices().nth(MAX_REFERENCE_FILE_CHARS) {
            Some((cut, _)) => (decoded[..cut].to_string(), true),
            None => (decoded.into_owned(), false),
        };

        Ok(Self {
            path,
            content,
            truncated,
        })
    }

    fn block(&self) -> String {
        let note = if self.truncated { TRUNCATION_NOTE } else { "" };
        format!(
            "Reference file: {}\n----- BEGIN FILE -----\n{}{}\n----- END FILE -----",
            self.path.display(),
            self.content,
            note
        )
    }
}

/// Resolve paths against `working_dir` and drop duplicates, keeping the
/// first occurrence.
pub fn resolve_reference_files(paths: &[PathBuf], working_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter_map(|path| normalize_reference_path(&path.to_string_lossy(), working_dir))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Read every resolved reference file.
///
/// # Errors
///
/// Fails on the first file that is missing, unreadable, or binary.
#[tracing::instrument(skip(paths), fields(count = paths.len()))]
pub fn read_reference_files(paths: &[PathBuf]) -> Result<Vec<ReferenceFile>, StorageError> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(|e| {
                let kind = if e.kind() == std::io::ErrorKind::NotFound {
                    StorageErrorKind::NotFound(format!("reference file {}", path.display()))
                } else {
                    StorageErrorKind::FileRead(format!("{}: {}", path.display(), e))
                };
                StorageError::new(kind)
            })?;
            let file = ReferenceFile::from_bytes(path.clone(), &bytes)?;
            if *file.truncated() {
                tracing::warn!(path = %path.display(), "Reference file truncated");
            }
            Ok(file)
        })
        .collect()
}

/// The reference section appended to a prompt, empty when there are no
/// files.
pub fn reference_context(files: &[ReferenceFile]) -> String {
    if files.is_empty() {
        return String::new();
    }

    let blocks = files
        .iter()
        .map(ReferenceFile::block)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Use the following reference files as factual context for this slide. \
         If the prompt conflicts with the files, prefer file details.\n\n{}",
        blocks
    )
}

/// Append reference file contents to a prompt or instruction.
///
/// Returns `text` unchanged when there are no files.
///
/// # Examples
///
/// ```
/// use nanoslides_storage::{ReferenceFile, inject_reference_context};
///
/// let file = ReferenceFile::from_bytes("notes.md", b"Revenue grew 12%").unwrap();
/// let prompt = inject_reference_context("Q3 results", &[file]);
/// assert!(prompt.starts_with("Q3 results\n\nUse the following reference files"));
/// assert!(prompt.ends_with("Revenue grew 12%\n----- END FILE -----"));
/// ```
pub fn inject_reference_context(text: &str, files: &[ReferenceFile]) -> String {
    if files.is_empty() {
        return text.to_string();
    }
    format!("{}\n\n{}", text, reference_context(files))
}
