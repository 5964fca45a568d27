//! Deck export error types.

/// Kinds of export errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExportErrorKind {
    /// Slides directory does not exist
    #[display("Slides directory not found: {}", _0)]
    MissingDirectory(String),
    /// Slides path exists but is not a directory
    #[display("Slides path is not a directory: {}", _0)]
    NotADirectory(String),
    /// Nothing to export
    #[display("No slide images found in {}", _0)]
    NoImages(String),
    /// Image header could not be read
    #[display("Unable to read image dimensions from {}", _0)]
    UnreadableImage(String),
    /// Writing the output archive failed
    #[display("Failed to write deck: {}", _0)]
    Write(String),
}

/// Export error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
