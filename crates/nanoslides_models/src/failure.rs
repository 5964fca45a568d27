//! User-facing classification of command failures.

use nanoslides_error::{NanoslidesError, NanoslidesErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static STATUS_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(4\d{2}|5\d{2})\b").ok());

const MAX_DETAIL_CHARS: usize = 240;

/// Broad cause of a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FailureClass {
    /// Provider overloaded or down
    #[strum(serialize = "Model temporarily unavailable")]
    Unavailable,
    /// Quota or rate limit hit
    #[strum(serialize = "Rate limit reached")]
    RateLimited,
    /// Key missing, wrong or without permission
    #[strum(serialize = "Authentication problem")]
    Authentication,
    /// Provider too slow
    #[strum(serialize = "Request timed out")]
    Timeout,
    /// Network could not reach the provider
    #[strum(serialize = "Network connection issue")]
    Network,
    /// Anything else
    #[strum(serialize = "Command failed")]
    Other,
}

impl FailureClass {
    /// One-sentence explanation.
    pub fn summary(&self) -> &'static str {
        match self {
            FailureClass::Unavailable => "The model provider is currently experiencing high demand.",
            FailureClass::RateLimited => {
                "The provider rejected this request because usage limits were hit."
            }
            FailureClass::Authentication => "The provider rejected authentication for this request.",
            FailureClass::Timeout => "The provider took too long to respond.",
            FailureClass::Network => {
                "A network problem interrupted communication with the provider."
            }
            FailureClass::Other => "An unexpected error occurred while running this command.",
        }
    }

    /// What the user can do next.
    pub fn hint(&self) -> &'static str {
        match self {
            FailureClass::Unavailable => {
                "Spikes are usually temporary. Please try the command again shortly."
            }
            FailureClass::RateLimited => {
                "Wait a moment, then retry. If this keeps happening, check your API quota."
            }
            FailureClass::Authentication => "Verify your Gemini key with `nanoslides setup` and retry.",
            FailureClass::Timeout => "Retry now, or increase timeout options when available.",
            FailureClass::Network => "Check your connection and retry.",
            FailureClass::Other => {
                "Try again. If the issue persists, rerun with --verbose for more context."
            }
        }
    }
}

/// A classified failure ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ProviderFailure {
    /// Broad cause
    class: FailureClass,
    /// HTTP-like status code, when one is known
    status_code: Option<u16>,
    /// Condensed error message
    detail: String,
}

impl ProviderFailure {
    /// Classify an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanoslides_error::{GeminiError, GeminiErrorKind, NanoslidesError};
    /// use nanoslides_models::{FailureClass, ProviderFailure};
    ///
    /// let err: NanoslidesError = GeminiError::new(GeminiErrorKind::HttpError {
    ///     status_code: 429,
    ///     message: "RESOURCE_EXHAUSTED: quota".to_string(),
    /// })
    /// .into();
    /// assert_eq!(*ProviderFailure::classify(&err).class(), FailureClass::RateLimited);
    /// ```
    pub fn classify(error: &NanoslidesError) -> Self {
        match error.kind() {
            NanoslidesErrorKind::Gemini(e) => {
                Self::from_parts(e.kind.status_code(), &e.kind.to_string())
            }
            // Only provider messages are scraped for a status code.
            _ => Self::build(None, &error.message()),
        }
    }

    /// Classify a status code and message, scraping the status from the
    /// message when none is given.
    pub fn from_parts(status_code: Option<u16>, message: &str) -> Self {
        Self::build(status_code.or_else(|| extract_status_code(message)), message)
    }

    fn build(status_code: Option<u16>, message: &str) -> Self {
        let haystack = message.to_lowercase();
        let has = |needle: &str| haystack.contains(needle);

        let class = if status_code == Some(503) || has("unavailable") || has("high demand") {
            FailureClass::Unavailable
        } else if status_code == Some(429)
            || has("rate limit")
            || has("resource_exhausted")
            || has("quota")
        {
            FailureClass::RateLimited
        } else if matches!(status_code, Some(401) | Some(403))
            || has("api key")
            || has("permission")
        {
            FailureClass::Authentication
        } else if has("timed out") || has("timeout") {
            FailureClass::Timeout
        } else if has("connection") && (has("refused") || has("reset") || has("dns") || has("failed"))
        {
            FailureClass::Network
        } else {
            FailureClass::Other
        };

        Self {
            class,
            status_code,
            detail: condense(message),
        }
    }

    /// Lines of the failure panel, optionally headed by the action that
    /// failed.
    pub fn render_lines(&self, action: Option<&str>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(action) = action {
            lines.push(action.to_string());
            lines.push(String::new());
        }
        lines.push(self.class.to_string());
        lines.push(self.class.summary().to_string());
        if let Some(code) = self.status_code {
            lines.push(format!("Provider status: {}", code));
        }
        lines.push(self.class.hint().to_string());
        if !self.detail.is_empty() {
            lines.push(format!("Details: {}", self.detail));
        }
        lines
    }
}

/// First 4xx/5xx number found in `message`.
pub fn extract_status_code(message: &str) -> Option<u16> {
    STATUS_CODE
        .as_ref()?
        .captures_iter(message)
        .filter_map(|captures| captures.get(1)?.as_str().parse::<u16>().ok())
        .find(|code| (400..=599).contains(code))
}

fn condense(message: &str) -> String {
    let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_DETAIL_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(MAX_DETAIL_CHARS - 3).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_status_code() {
        assert_eq!(extract_status_code("got HTTP 503 from upstream"), Some(503));
        assert_eq!(extract_status_code("port 8080 and 200 OK"), None);
        assert_eq!(extract_status_code("error1503"), None);
    }

    #[test]
    fn test_classification_order() {
        let class = |code, msg| *ProviderFailure::from_parts(code, msg).class();
        assert_eq!(class(Some(503), "overloaded"), FailureClass::Unavailable);
        assert_eq!(class(None, "UNAVAILABLE: try later"), FailureClass::Unavailable);
        assert_eq!(class(Some(429), "slow down"), FailureClass::RateLimited);
        assert_eq!(class(Some(403), "denied"), FailureClass::Authentication);
        assert_eq!(class(None, "Missing Gemini API key"), FailureClass::Authentication);
        assert_eq!(class(None, "request timed out"), FailureClass::Timeout);
        assert_eq!(class(None, "connection refused"), FailureClass::Network);
        assert_eq!(class(None, "slide not found"), FailureClass::Other);
    }

    #[test]
    fn test_condense_long_detail() {
        let long = "word ".repeat(100);
        let detail = condense(&long);
        assert_eq!(detail.chars().count(), MAX_DETAIL_CHARS);
        assert!(detail.ends_with("..."));
    }

    #[test]
    fn test_render_lines() {
        let failure = ProviderFailure::from_parts(Some(429), "quota exceeded");
        let lines = failure.render_lines(Some("Generating slide"));
        assert_eq!(lines[0], "Generating slide");
        assert_eq!(lines[2], "Rate limit reached");
        assert!(lines.contains(&"Provider status: 429".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Details: quota exceeded"));
    }
}
