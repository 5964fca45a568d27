//! Style selection error types.

/// Kinds of style errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StyleErrorKind {
    /// A command needed a style id and none was given
    #[display("A style id is required")]
    MissingStyleId,
    /// The global registry has no entry under this id
    #[display("Global style '{}' does not exist", _0)]
    UnknownStyle(String),
    /// The id cannot be used as a registry key
    #[display("Invalid style id '{}': {}", id, reason)]
    InvalidStyleId {
        /// The rejected id
        id: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Style error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Style Error: {} at line {} in {}", kind, line, file)]
pub struct StyleError {
    /// The kind of error that occurred
    pub kind: StyleErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StyleError {
    /// Create a new style error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StyleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
