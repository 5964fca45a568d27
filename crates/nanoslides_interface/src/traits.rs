//! Capability traits at the collaborator seams.

use crate::PlannedDeck;
use async_trait::async_trait;
use nanoslides_core::{EditSlideRequest, GenerateSlideRequest, PlanRequest, ResolvedStyle, SlideResult};
use nanoslides_error::NanoslidesResult;
use std::path::{Path, PathBuf};

/// Image generation backend.
///
/// Implementations read style reference images when the call is made, so a
/// missing reference file fails the call rather than style resolution.
#[async_trait]
pub trait SlideEngine: Send + Sync {
    /// Generate a slide from a prompt.
    async fn generate(&self, req: &GenerateSlideRequest) -> NanoslidesResult<SlideResult>;

    /// Edit an existing slide image.
    async fn edit(&self, req: &EditSlideRequest) -> NanoslidesResult<SlideResult>;

    /// Engine identifier recorded in metadata (e.g. "nanobanana").
    fn engine_name(&self) -> &'static str;

    /// Provider model identifier.
    fn model_name(&self) -> &str;
}

/// Plans a whole deck from one high-level request.
#[async_trait]
pub trait PresentationPlanner: Send + Sync {
    /// Produce a validated plan.
    ///
    /// `style` is the context the caller already has; a planner should only
    /// infer a new style when it is empty.
    async fn plan(&self, req: &PlanRequest, style: &ResolvedStyle) -> NanoslidesResult<PlannedDeck>;
}

/// Renders ordered slide images into a shareable document.
pub trait DeckExporter {
    /// File extension of the produced document (e.g. "pptx").
    fn extension(&self) -> &'static str;

    /// Write `images`, in order, to `output`.
    fn export(&self, images: &[PathBuf], output: &Path) -> NanoslidesResult<PathBuf>;
}
