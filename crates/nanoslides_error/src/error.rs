//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ExportError, GeminiError, JsonError, SlideError, SlideErrorKind,
    StorageError, StyleError,
};

/// Every error condition nanoslides can report, grouped by concern.
///
/// # Examples
///
/// ```
/// use nanoslides_error::{ConfigError, ConfigErrorKind, NanoslidesError};
///
/// let err: NanoslidesError = ConfigError::new(ConfigErrorKind::HomeDirectory).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum NanoslidesErrorKind {
    /// Slide lookup or mutation contract violation
    #[from(SlideError)]
    Slide(SlideError),
    /// Style selection error
    #[from(StyleError)]
    Style(StyleError),
    /// Persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON encoding error
    #[from(JsonError)]
    Json(JsonError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Deck export error
    #[from(ExportError)]
    Export(ExportError),
}

/// nanoslides error with kind discrimination.
///
/// # Examples
///
/// ```
/// use nanoslides_error::{NanoslidesErrorKind, NanoslidesResult, SlideError, SlideErrorKind};
///
/// fn might_fail() -> NanoslidesResult<()> {
///     Err(SlideError::new(SlideErrorKind::InvalidArgument("position 0".into())))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), NanoslidesErrorKind::Slide(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("nanoslides Error: {}", _0)]
pub struct NanoslidesError(Box<NanoslidesErrorKind>);

impl NanoslidesError {
    /// Create a new error from a kind.
    pub fn new(kind: NanoslidesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &NanoslidesErrorKind {
        &self.0
    }

    /// The underlying condition without location details, for end users.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanoslides_error::{NanoslidesError, SlideError, SlideErrorKind};
    ///
    /// let err: NanoslidesError = SlideError::new(SlideErrorKind::NotFound("intro".into())).into();
    /// assert_eq!(err.message(), "Slide 'intro' was not found");
    /// ```
    pub fn message(&self) -> String {
        match self.kind() {
            NanoslidesErrorKind::Slide(e) => e.kind.to_string(),
            NanoslidesErrorKind::Style(e) => e.kind.to_string(),
            NanoslidesErrorKind::Storage(e) => e.kind.to_string(),
            NanoslidesErrorKind::Config(e) => e.kind.to_string(),
            NanoslidesErrorKind::Json(e) => e.describe(),
            NanoslidesErrorKind::Builder(e) => e.kind().to_string(),
            NanoslidesErrorKind::Gemini(e) => e.kind.to_string(),
            NanoslidesErrorKind::Export(e) => e.kind.to_string(),
        }
    }

    /// The slide error kind, when this is a slide contract violation.
    pub fn slide_kind(&self) -> Option<&SlideErrorKind> {
        match self.kind() {
            NanoslidesErrorKind::Slide(err) => Some(&err.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to NanoslidesErrorKind
impl<T> From<T> for NanoslidesError
where
    T: Into<NanoslidesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for nanoslides operations.
pub type NanoslidesResult<T> = std::result::Result<T, NanoslidesError>;
