//! Supported deck formats.

use crate::PptxExporter;
use nanoslides_interface::DeckExporter;

/// Deck file formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeckFormat {
    /// PowerPoint
    #[default]
    Pptx,
}

/// Exporter for a format.
pub fn exporter_for(format: DeckFormat) -> Box<dyn DeckExporter> {
    match format {
        DeckFormat::Pptx => Box::new(PptxExporter::new()),
    }
}
