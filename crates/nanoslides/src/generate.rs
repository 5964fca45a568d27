//! Single-slide generation.

use crate::Workspace;
use nanoslides_core::{AspectRatio, GenerateSlideRequest, NewSlide, ResolvedStyle, SlideEntry};
use nanoslides_error::NanoslidesResult;
use nanoslides_interface::SlideEngine;
use nanoslides_storage::{inject_reference_context, read_reference_files, resolve_reference_files};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Inputs of `nanoslides generate`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// What the slide should show
    pub prompt: String,
    /// Global style override
    pub style_id: Option<String>,
    /// Extra style reference images
    pub references: Vec<PathBuf>,
    /// Text files injected into the prompt
    pub reference_files: Vec<PathBuf>,
    /// Output aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Where to write the image
    pub output_dir: Option<PathBuf>,
    /// Requested slide id
    pub slide_id: Option<String>,
}

impl GenerateOptions {
    /// Options with only a prompt set.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// Result of [`generate_slide`].
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct GeneratedSlide {
    /// Final image location
    path: PathBuf,
    /// Project entry, when a project exists
    slide: Option<SlideEntry>,
    /// Style the engine received
    style: ResolvedStyle,
}

/// Generate one slide and, inside a project, append it to the deck.
///
/// Without `slides.yaml` the image is only written to disk. Inside a project
/// the slide is added after the last main slide and its image renamed to
/// `{order}_{id}.{ext}`.
///
/// # Errors
///
/// Fails when a reference file cannot be read, the engine fails, or the
/// image or project cannot be written. Nothing is recorded on failure.
#[instrument(skip(engine, workspace, options), fields(engine = engine.engine_name(), model = engine.model_name()))]
pub async fn generate_slide(
    engine: &dyn SlideEngine,
    workspace: &Workspace,
    options: &GenerateOptions,
) -> NanoslidesResult<GeneratedSlide> {
    let project_dir = workspace.paths().project_dir().as_path();
    let reference_paths = resolve_reference_files(&options.reference_files, Some(project_dir));
    let reference_files = read_reference_files(&reference_paths)?;
    let prompt = inject_reference_context(&options.prompt, &reference_files);

    let style = workspace.resolve_style(options.style_id.as_deref(), &options.references)?;
    let mut presentation = workspace.load_project_if_present()?;

    let request = GenerateSlideRequest::new(prompt, style.clone(), options.aspect_ratio);
    let result = engine.generate(&request).await?;

    let images = workspace.image_store(options.output_dir.as_deref());
    let mut path = images.persist(&result, "slide").await?;

    let slide = match presentation.as_mut() {
        Some(presentation) => {
            let (_, _, mut metadata) = result.into_parts();
            metadata.reference_files = reference_paths
                .iter()
                .map(|path| path.display().to_string())
                .collect();

            let mut new_slide = NewSlide::new(options.prompt.clone()).with_metadata(metadata);
            if let Some(id) = &options.slide_id {
                new_slide = new_slide.with_id(id.clone());
            }
            let entry = presentation.add_slide(new_slide)?;

            path = images.rename_for_slide(&path, *entry.order(), entry.id()).await?;
            presentation.set_image_path(entry.id(), Some(path.clone()))?;
            workspace.project_store().save(presentation)?;
            presentation.find_slide(entry.id()).cloned()
        }
        None => None,
    };

    info!(path = %path.display(), slide_id = ?slide.as_ref().map(|s| s.id()), "Generated slide");
    Ok(GeneratedSlide { path, slide, style })
}
