//! Core data types for nanoslides.
//!
//! This crate holds the deck model and the algorithms that operate on it:
//! slide identifiers, the presentation state with its draft lifecycle, and
//! the layered style resolver. Nothing in here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod plan;
mod presentation;
mod request;
mod slide;
mod slide_id;
mod style;

pub use plan::{Level, MAX_PLANNED_SLIDES, PlanRequest, PlanRequestBuilder, PlannedSlide, PresentationPlan};
pub use presentation::{NewSlide, Presentation};
pub use request::{AspectRatio, EditSlideRequest, GenerateSlideRequest, SlideResult};
pub use slide::{ReviewStatus, SlideEntry, SlideEntryBuilder, SlideMetadata};
pub use slide_id::{DEFAULT_MAX_WORDS, FALLBACK_SLIDE_ID, dedupe_slide_id, suggest_slide_id};
pub use style::{
    ProjectStyle, ResolvedStyle, StyleDefinition, StyleRegistry, StyleResolver,
    normalize_reference_path, normalize_style_id,
};
