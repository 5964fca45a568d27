//! Trait definitions for nanoslides collaborators.
//!
//! The deck model in `nanoslides_core` is pure. Everything that talks to the
//! outside world sits behind one of these traits so commands can be tested
//! with doubles.

mod traits;
mod types;

pub use traits::{DeckExporter, PresentationPlanner, SlideEngine};
pub use types::PlannedDeck;
