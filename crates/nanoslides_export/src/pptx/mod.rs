//! PowerPoint export.

mod exporter;
mod layout;
mod parts;

pub use exporter::PptxExporter;
pub use layout::{
    DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU, EMU_PER_PIXEL, PictureFrame, SlideSize,
    fit_picture, slide_size_for,
};
