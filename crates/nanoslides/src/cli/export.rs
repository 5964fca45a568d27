//! Export command handler.

use nanoslides::{DeckFormat, NanoslidesResult, Workspace, exporter_for, list_slide_images};
use std::path::{Path, PathBuf};

/// Export the images in `slides_dir` into a deck file.
pub fn export(
    workspace: &Workspace,
    slides_dir: &Path,
    output: Option<PathBuf>,
    format: DeckFormat,
) -> NanoslidesResult<()> {
    let paths = workspace.paths();
    let exporter = exporter_for(format);
    let slides_dir = paths.in_project(slides_dir);
    let images = list_slide_images(&slides_dir)?;

    let output = output.unwrap_or_else(|| {
        let stem = paths
            .project_dir()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "slides".to_string());
        PathBuf::from(stem)
    });
    let mut output = paths.in_project(&output);
    if output.extension().is_none() {
        output.set_extension(exporter.extension());
    }

    let saved = exporter.export(&images, &output)?;
    println!(
        "Exported {} slides from {} to {} as {}.",
        images.len(),
        slides_dir.display(),
        saved.display(),
        format.to_string().to_uppercase()
    );
    Ok(())
}
