//! nanoslides - AI-generated presentation slides
//!
//! nanoslides keeps a small project (`slides.yaml`) of ordered slide images,
//! generates and edits them with Gemini image models, plans whole decks from
//! one prompt, and exports the result as a PowerPoint file.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use nanoslides::{
//!     GenerateOptions, GeminiClient, ImageModel, NanoBananaEngine, NanoslidesPaths, Workspace,
//!     generate_slide,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workspace = Workspace::load(NanoslidesPaths::for_project(".")?)?;
//!     let engine = NanoBananaEngine::new(workspace.gemini_client()?, ImageModel::Pro);
//!
//!     let generated =
//!         generate_slide(&engine, &workspace, &GenerateOptions::new("Company vision overview"))
//!             .await?;
//!     println!("Saved to {}", generated.path().display());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! nanoslides is organized as a workspace with focused crates:
//!
//! - `nanoslides_error` - Error types
//! - `nanoslides_core` - Slide ids, presentation state, style resolution
//! - `nanoslides_interface` - `SlideEngine`, `PresentationPlanner`, `DeckExporter`
//! - `nanoslides_storage` - Project, style, config, and image files
//! - `nanoslides_models` - Gemini engine and planner
//! - `nanoslides_export` - PPTX export
//!
//! This crate re-exports everything and adds the command workflows used by
//! the `nanoslides` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod deck;
mod edit;
mod generate;
mod logging;
mod workspace;

pub use deck::{DeckOptions, DeckOutcome, DeckPlan, DeckRow, generate_deck, plan_deck};
pub use edit::{EditOptions, EditTarget, EditedSlide, edit_slide, resolve_edit_target};
pub use generate::{GenerateOptions, GeneratedSlide, generate_slide};
pub use logging::init_logging;
pub use workspace::Workspace;

pub use nanoslides_core::*;
pub use nanoslides_error::*;
pub use nanoslides_export::*;
pub use nanoslides_interface::*;
pub use nanoslides_models::*;
pub use nanoslides_storage::*;
