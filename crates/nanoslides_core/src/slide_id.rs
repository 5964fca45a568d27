//! Human-readable slide identifiers derived from prompt text.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Default number of words kept by [`suggest_slide_id`].
pub const DEFAULT_MAX_WORDS: usize = 3;

/// Identifier used when no usable token survives normalization.
pub const FALLBACK_SLIDE_ID: &str = "slide";

const STOPWORDS: &[&str] = &[
    "a",
    "about",
    "an",
    "and",
    "are",
    "as",
    "at",
    "be",
    "by",
    "deck",
    "for",
    "from",
    "in",
    "into",
    "is",
    "it",
    "its",
    "of",
    "on",
    "onto",
    "or",
    "our",
    "page",
    "presentation",
    "slide",
    "slides",
    "that",
    "the",
    "their",
    "these",
    "this",
    "those",
    "to",
    "with",
    "your",
    // Contraction fragments left behind by apostrophes.
    "d",
    "ll",
    "m",
    "re",
    "s",
    "t",
    "ve",
];

/// Suggest a short identifier for a slide prompt.
///
/// Accents are folded to ASCII, the text is split on alphanumeric runs and
/// lower-cased, stopwords are dropped and the first `max_words` tokens are
/// joined with hyphens. When every token is a stopword the first `max_words`
/// raw tokens are used instead, and when nothing survives at all the result is
/// [`FALLBACK_SLIDE_ID`].
///
/// # Examples
///
/// ```
/// use nanoslides_core::suggest_slide_id;
///
/// assert_eq!(suggest_slide_id("The Company's Vision & Overview", 3), "company-vision-overview");
/// assert_eq!(suggest_slide_id("", 3), "slide");
/// ```
pub fn suggest_slide_id(prompt: &str, max_words: usize) -> String {
    let tokens = tokenize(prompt);
    let kept: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|token| !STOPWORDS.contains(token))
        .take(max_words)
        .collect();

    let chosen: Vec<&str> = if kept.is_empty() {
        tokens.iter().map(String::as_str).take(max_words).collect()
    } else {
        kept
    };

    join_or_fallback(&chosen)
}

/// Make `candidate` unique against `existing` ids.
///
/// The candidate is normalized to the same slug shape as suggested ids, then
/// suffixed with `-2`, `-3`, ... until it no longer collides. `existing` is
/// only read.
///
/// # Examples
///
/// ```
/// use nanoslides_core::dedupe_slide_id;
///
/// assert_eq!(dedupe_slide_id("vision-overview", ["vision-overview"]), "vision-overview-2");
/// assert_eq!(
///     dedupe_slide_id("vision-overview", ["vision-overview", "vision-overview-2"]),
///     "vision-overview-3"
/// );
/// ```
pub fn dedupe_slide_id<I, S>(candidate: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect();

    let tokens = tokenize(candidate);
    let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let base = join_or_fallback(&refs);

    if !taken.contains(&base) {
        return base;
    }

    let mut counter = 2usize;
    loop {
        let attempt = format!("{base}-{counter}");
        if !taken.contains(&attempt) {
            return attempt;
        }
        counter += 1;
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let folded: String = text.nfkd().filter(char::is_ascii).collect();
    folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_ascii_lowercase)
        .collect()
}

fn join_or_fallback(tokens: &[&str]) -> String {
    if tokens.is_empty() {
        FALLBACK_SLIDE_ID.to_string()
    } else {
        tokens.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_folds_accents() {
        assert_eq!(tokenize("Café Résumé"), vec!["cafe", "resume"]);
    }

    #[test]
    fn tokenize_drops_non_ascii_scripts() {
        assert_eq!(tokenize("日本 roadmap"), vec!["roadmap"]);
    }
}
