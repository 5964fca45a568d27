//! Gemini REST integration.

mod client;
mod dto;
mod engine;
mod planner;

pub use client::{DEFAULT_BASE_URL, GeminiClient};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineData, Part,
};
pub use engine::{ENGINE_NAME, ImageModel, NanoBananaEngine};
pub use planner::{GeminiPlanner, PLANNER_FALLBACK_MODEL, PLANNER_PRIMARY_MODEL, parse_plan};
