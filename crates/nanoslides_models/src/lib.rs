//! Generation backends for nanoslides.
//!
//! - [`NanoBananaEngine`]: slide images from Gemini image models
//! - [`GeminiPlanner`]: whole-deck plans from Gemini text models, with
//!   fallback to a second model when the first is unavailable
//! - [`build_slide_prompt`] / [`build_planner_prompt`]: prompt assembly
//! - [`ProviderFailure`]: classification of failures for the CLI
//!
//! Both backends talk to the REST `generateContent` endpoint through a
//! shared [`GeminiClient`], whose base URL can be pointed at a mock server.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod failure;
mod gemini;
mod prompt;

pub use failure::{FailureClass, ProviderFailure, extract_status_code};
pub use gemini::{
    Candidate, Content, DEFAULT_BASE_URL, ENGINE_NAME, GeminiClient, GeminiPlanner,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, ImageModel,
    InlineData, NanoBananaEngine, PLANNER_FALLBACK_MODEL, PLANNER_PRIMARY_MODEL, Part, parse_plan,
};
pub use prompt::{PromptMode, build_planner_prompt, build_slide_prompt};
