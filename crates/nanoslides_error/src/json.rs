//! Errors encoding values as JSON for files and command output.

/// A value could not be encoded as JSON.
///
/// `subject` names what was being written, such as a file path or
/// `"slide list"`.
///
/// # Examples
///
/// ```
/// use nanoslides_error::JsonError;
///
/// let err = JsonError::new("style.json", "key must be a string");
/// assert_eq!(err.describe(), "Could not encode style.json as JSON: key must be a string");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: Could not encode {} as JSON: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// What was being encoded
    pub subject: String,
    /// Encoder message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Record a failure to encode `subject`.
    #[track_caller]
    pub fn new(subject: impl Into<String>, message: impl ToString) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject: subject.into(),
            message: message.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Message without location details.
    pub fn describe(&self) -> String {
        format!("Could not encode {} as JSON: {}", self.subject, self.message)
    }
}
