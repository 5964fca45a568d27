//! Slide contract violations raised by presentation mutations.

/// Kinds of slide errors.
///
/// None of these are retryable: they describe a caller handing the
/// presentation an id or position that does not fit its current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SlideErrorKind {
    /// Referenced slide, draft, or draft source does not exist
    #[display("Slide '{}' was not found", _0)]
    NotFound(String),
    /// Malformed argument (position out of range, empty instruction, ...)
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),
    /// Draft linkage is broken or the entry is not a draft
    #[display("Integrity violation: {}", _0)]
    IntegrityViolation(String),
}

/// Slide error with location tracking.
///
/// # Examples
///
/// ```
/// use nanoslides_error::{SlideError, SlideErrorKind};
///
/// let err = SlideError::new(SlideErrorKind::NotFound("intro".to_string()));
/// assert!(format!("{}", err).contains("'intro' was not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Slide Error: {} at line {} in {}", kind, line, file)]
pub struct SlideError {
    /// The kind of error that occurred
    pub kind: SlideErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SlideError {
    /// Create a new slide error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SlideErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
