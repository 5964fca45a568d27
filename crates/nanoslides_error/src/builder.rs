//! Errors raised while assembling slide entries and planning requests.

/// Why a value could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was never set
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// Fields were set but contradict each other
    #[display("Slide '{}' is inconsistent: {}", id, reason)]
    InconsistentSlide {
        /// Slide id, possibly blank
        id: String,
        /// Which rule was broken
        reason: String,
    },
}

/// Builder error with location tracking.
///
/// # Examples
///
/// ```
/// use nanoslides_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::new(BuilderErrorKind::MissingField("order".into()));
/// assert_eq!(err.kind().to_string(), "Missing required field: order");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for [`BuilderErrorKind::InconsistentSlide`].
    #[track_caller]
    pub fn inconsistent_slide(id: &str, reason: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::InconsistentSlide {
            id: id.to_string(),
            reason: reason.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
