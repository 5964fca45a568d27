//! Deck export for nanoslides.
//!
//! Slide images are collected from a directory with [`list_slide_images`]
//! and handed to a [`DeckExporter`](nanoslides_interface::DeckExporter).
//! The only format today is PowerPoint, written by [`PptxExporter`] as a
//! minimal Office Open XML package with one full-bleed picture per slide.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod format;
mod images;
mod pptx;

pub use format::{DeckFormat, exporter_for};
pub use images::{SUPPORTED_EXTENSIONS, list_slide_images};
pub use pptx::{
    DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU, EMU_PER_PIXEL, PictureFrame, PptxExporter,
    SlideSize, fit_picture, slide_size_for,
};
