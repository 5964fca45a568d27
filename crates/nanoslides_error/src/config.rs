//! Configuration and environment errors.

/// What went wrong while locating, reading, or writing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// `$HOME` could not be determined
    #[display("Unable to locate the home directory")]
    HomeDirectory,
    /// The working directory could not be read
    #[display("Unable to read the current directory: {}", _0)]
    CurrentDirectory(String),
    /// `config.toml` exists but could not be loaded
    #[display("Failed to read configuration: {}", _0)]
    Read(String),
    /// Configuration could not be serialized
    #[display("Failed to serialize configuration: {}", _0)]
    Serialize(String),
    /// A required value was blank
    #[display("{} must not be empty", _0)]
    Blank(&'static str),
    /// Provider name outside the supported set
    #[display("Unsupported provider '{}'; supported providers: {}", provider, supported)]
    UnsupportedProvider {
        /// Requested provider
        provider: String,
        /// Comma-separated supported providers
        supported: String,
    },
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use nanoslides_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Blank("API key"));
/// assert_eq!(err.kind.to_string(), "API key must not be empty");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
