//! PPTX package writer.

use super::layout::{fit_picture, slide_size_for};
use super::parts::{self, MediaKind};
use nanoslides_error::{ExportError, ExportErrorKind, NanoslidesResult};
use nanoslides_interface::DeckExporter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes slide images as a picture-only PowerPoint deck.
///
/// Each image becomes one slide. Slides take the images' own size when all
/// images share an aspect ratio, otherwise a 16:9 canvas with each image
/// scaled to fit and centered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PptxExporter;

impl PptxExporter {
    /// Create an exporter.
    pub fn new() -> Self {
        Self
    }

    fn write_package(
        &self,
        images: &[PathBuf],
        dimensions: &[(u32, u32)],
        output: &Path,
    ) -> Result<(), ExportError> {
        let size = slide_size_for(dimensions);
        debug!(cx = size.cx, cy = size.cy, "Chose slide size");

        let file = File::create(output).map_err(|e| write_error(output, e))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let xml_options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let media_options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let count = images.len();
        let fixed_parts: [(&str, String); 9] = [
            ("[Content_Types].xml", parts::content_types_xml(count)?),
            ("_rels/.rels", parts::root_rels_xml()),
            ("ppt/presentation.xml", parts::presentation_xml(count, size)?),
            ("ppt/_rels/presentation.xml.rels", parts::presentation_rels_xml(count)?),
            ("ppt/slideMasters/slideMaster1.xml", parts::slide_master_xml()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                parts::slide_master_rels_xml(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml", parts::slide_layout_xml()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                parts::slide_layout_rels_xml(),
            ),
            ("ppt/theme/theme1.xml", parts::theme_xml()),
        ];
        for (name, xml) in &fixed_parts {
            add_part(&mut zip, name, xml_options, xml.as_bytes(), output)?;
        }

        for (index, (path, &(width, height))) in images.iter().zip(dimensions).enumerate() {
            let number = index + 1;
            let kind = MediaKind::from_extension(
                path.extension().and_then(|ext| ext.to_str()).unwrap_or_default(),
            );
            let media_name = format!("image{}.{}", number, kind.extension());
            let bytes = std::fs::read(path).map_err(|e| {
                ExportError::new(ExportErrorKind::UnreadableImage(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            let display_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let frame = fit_picture(size, width, height);
            add_part(
                &mut zip,
                &format!("ppt/media/{}", media_name),
                media_options,
                &bytes,
                output,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", number),
                xml_options,
                parts::slide_xml(number, &display_name, frame)?.as_bytes(),
                output,
            )?;
            add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                xml_options,
                parts::slide_rels_xml(&media_name).as_bytes(),
                output,
            )?;
        }

        let mut writer = zip.finish().map_err(|e| write_error(output, e))?;
        writer.flush().map_err(|e| write_error(output, e))?;
        Ok(())
    }
}

fn add_part<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    options: SimpleFileOptions,
    bytes: &[u8],
    output: &Path,
) -> Result<(), ExportError> {
    zip.start_file(name, options)
        .map_err(|e| write_error(output, e))?;
    zip.write_all(bytes).map_err(|e| write_error(output, e))
}

#[track_caller]
fn write_error(output: &Path, error: impl std::fmt::Display) -> ExportError {
    ExportError::new(ExportErrorKind::Write(format!(
        "{}: {}",
        output.display(),
        error
    )))
}

fn read_dimensions(images: &[PathBuf]) -> Result<Vec<(u32, u32)>, ExportError> {
    images
        .iter()
        .map(|path| {
            image::image_dimensions(path).map_err(|e| {
                ExportError::new(ExportErrorKind::UnreadableImage(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })
        })
        .collect()
}

impl DeckExporter for PptxExporter {
    fn extension(&self) -> &'static str {
        "pptx"
    }

    #[instrument(skip(self, images), fields(count = images.len(), output = %output.display()))]
    fn export(&self, images: &[PathBuf], output: &Path) -> NanoslidesResult<PathBuf> {
        if images.is_empty() {
            return Err(ExportError::new(ExportErrorKind::NoImages(
                "the provided image list".to_string(),
            ))
            .into());
        }

        let dimensions = read_dimensions(images)?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| write_error(output, e))?;
        }

        self.write_package(images, &dimensions, output)?;
        info!(slides = images.len(), "Exported deck");
        Ok(output.to_path_buf())
    }
}
