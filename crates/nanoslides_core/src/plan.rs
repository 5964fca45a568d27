//! Deck planning inputs and outputs.

use nanoslides_error::{GeminiError, GeminiErrorKind};
use serde::{Deserialize, Serialize};

/// Largest deck the planner may return.
pub const MAX_PLANNED_SLIDES: usize = 40;

/// Low/medium/high knob used for detail and illustration levels.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}

/// What the user wants the deck to be.
#[derive(Debug, Clone, PartialEq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct PlanRequest {
    /// Deck objective
    prompt: String,
    /// Intended audience
    #[builder(default, setter(strip_option))]
    audience: Option<String>,
    /// Where the deck will be used
    #[builder(default, setter(strip_option))]
    use_case: Option<String>,
    /// Talk length
    #[builder(default, setter(strip_option))]
    duration_minutes: Option<u32>,
    /// Exact number of slides wanted
    #[builder(default, setter(strip_option))]
    slide_count: Option<usize>,
    /// How technical the content should be
    #[builder(default)]
    detail_level: Level,
    /// How illustration-heavy the visuals should be
    #[builder(default)]
    illustration_level: Level,
    /// Content language
    #[builder(default = "String::from(\"en\")")]
    language: String,
    /// Number of reference text files behind `reference_context`
    #[builder(default)]
    reference_file_count: usize,
    /// Reference file contents appended to the planner prompt
    #[builder(default)]
    reference_context: String,
}

impl PlanRequest {
    /// Creates a new plan request builder.
    pub fn builder() -> PlanRequestBuilder {
        PlanRequestBuilder::default()
    }
}

/// One planned slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSlide {
    /// Slide title
    pub title: String,
    /// Standalone image prompt for the slide
    pub prompt: String,
}

/// Deck plan returned by a planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationPlan {
    /// Deck title
    pub deck_title: String,
    /// Short summary of the plan
    #[serde(default)]
    pub planning_summary: String,
    /// Style base prompt inferred when the caller had no style
    #[serde(default)]
    pub inferred_style_base_prompt: String,
    /// Style negative prompt inferred when the caller had no style
    #[serde(default)]
    pub inferred_style_negative_prompt: String,
    /// Planned slides, in presentation order
    #[serde(default)]
    pub slides: Vec<PlannedSlide>,
}

impl PresentationPlan {
    /// Check slide bounds and, when given, the exact requested count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlan` when the plan has no slides, more than
    /// [`MAX_PLANNED_SLIDES`], or a count different from `expected`.
    #[track_caller]
    pub fn validate(&self, expected: Option<usize>) -> Result<(), GeminiError> {
        let count = self.slides.len();
        if count == 0 || count > MAX_PLANNED_SLIDES {
            return Err(GeminiError::new(GeminiErrorKind::InvalidPlan(format!(
                "expected between 1 and {MAX_PLANNED_SLIDES} slides, got {count}"
            ))));
        }
        if let Some(expected) = expected
            && expected != count
        {
            return Err(GeminiError::new(GeminiErrorKind::InvalidPlan(format!(
                "planner returned {count} slides but slide-count={expected}"
            ))));
        }
        Ok(())
    }
}
