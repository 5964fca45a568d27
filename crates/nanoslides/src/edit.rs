//! Editing an existing slide image.

use crate::Workspace;
use nanoslides_core::{EditSlideRequest, Presentation, ResolvedStyle, ReviewStatus, SlideEntry};
use nanoslides_error::{
    NanoslidesResult, SlideError, SlideErrorKind, StorageError, StorageErrorKind,
};
use nanoslides_interface::SlideEngine;
use nanoslides_storage::ImageStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// What an edit starts from.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct EditTarget {
    /// Image file sent to the engine
    source: PathBuf,
    /// Project slide owning that image, if any
    slide: Option<SlideEntry>,
}

/// Inputs of `nanoslides edit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOptions {
    /// Slide id or image path
    pub target: String,
    /// What to change
    pub instruction: String,
    /// Global style override
    pub style_id: Option<String>,
    /// Extra style reference images
    pub references: Vec<PathBuf>,
    /// Where to write the edited image
    pub output_dir: Option<PathBuf>,
    /// Record the result as a draft instead of replacing the slide
    pub draft: bool,
}

impl EditOptions {
    /// Options for editing `target` with `instruction`.
    pub fn new(target: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            instruction: instruction.into(),
            ..Default::default()
        }
    }
}

/// Result of [`edit_slide`].
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct EditedSlide {
    /// Image the edit started from
    source: PathBuf,
    /// Edited image location
    path: PathBuf,
    /// Updated slide or new draft, when the target is part of the project
    slide: Option<SlideEntry>,
    /// Style the engine received
    style: ResolvedStyle,
}

/// Work out which image `target` names.
///
/// An existing file wins. It is matched against the project's slide images
/// so editing a slide's file by path still updates the slide. Anything else
/// is looked up as a slide id.
///
/// # Errors
///
/// - `InvalidArgument` if the target exists but is not a file, or the slide has no image
/// - `NotFound` if no file or slide matches
/// - storage `NotFound` if the slide's image file is missing
pub fn resolve_edit_target(
    workspace: &Workspace,
    presentation: Option<&Presentation>,
    target: &str,
) -> NanoslidesResult<EditTarget> {
    let paths = workspace.paths();
    let target_path = paths.in_project(Path::new(target));

    if target_path.exists() {
        if !target_path.is_file() {
            return Err(SlideError::new(SlideErrorKind::InvalidArgument(format!(
                "edit target is not a file: {}",
                target_path.display()
            )))
            .into());
        }
        let source = canonical(&target_path);
        let slide = presentation.and_then(|presentation| {
            presentation
                .ordered_all()
                .into_iter()
                .find(|slide| {
                    slide
                        .image_path()
                        .as_deref()
                        .is_some_and(|image| canonical(&paths.in_project(image)) == source)
                })
                .cloned()
        });
        debug!(source = %source.display(), slide = ?slide.as_ref().map(|s| s.id()), "Edit target is a file");
        return Ok(EditTarget { source, slide });
    }

    let slide = presentation
        .and_then(|presentation| presentation.find_slide(target))
        .cloned()
        .ok_or_else(|| SlideError::new(SlideErrorKind::NotFound(target.to_string())))?;
    let image = slide.image_path().as_deref().ok_or_else(|| {
        SlideError::new(SlideErrorKind::InvalidArgument(format!(
            "slide '{}' has no image path",
            target
        )))
    })?;

    let source = paths.in_project(image);
    if !source.is_file() {
        return Err(StorageError::new(StorageErrorKind::NotFound(format!(
            "slide image {}",
            source.display()
        )))
        .into());
    }
    Ok(EditTarget {
        source: canonical(&source),
        slide: Some(slide),
    })
}

/// Edit an image and record the result in the project.
///
/// When the target belongs to the project the slide's prompt becomes the
/// instruction and `edited_from` records the source image. With
/// `options.draft` a pending draft is added next to the slide instead and
/// the slide itself is left alone.
///
/// # Errors
///
/// Fails when the target cannot be resolved, a draft is requested for an
/// image outside the project, or the engine or storage fails.
#[instrument(skip(engine, workspace, options), fields(target = %options.target, draft = options.draft))]
pub async fn edit_slide(
    engine: &dyn SlideEngine,
    workspace: &Workspace,
    options: &EditOptions,
) -> NanoslidesResult<EditedSlide> {
    let mut presentation = workspace.load_project_if_present()?;
    let target = resolve_edit_target(workspace, presentation.as_ref(), &options.target)?;
    if options.draft && target.slide.is_none() {
        return Err(SlideError::new(SlideErrorKind::InvalidArgument(
            "--draft needs a slide from slides.yaml as the target".to_string(),
        ))
        .into());
    }

    let style = workspace.resolve_style(options.style_id.as_deref(), &options.references)?;
    let image = ImageStore::read(&target.source).await?;
    let request = EditSlideRequest::new(image, options.instruction.clone(), style.clone())?;
    let result = engine.edit(&request).await?;

    let images = workspace.image_store(options.output_dir.as_deref());
    let mut path = images.persist(&result, "edit").await?;

    let slide = match (presentation.as_mut(), &target.slide) {
        (Some(presentation), Some(slide)) => {
            let (_, _, mut metadata) = result.into_parts();
            metadata.edited_from = Some(target.source.display().to_string());

            let entry = if options.draft {
                metadata.review_status = Some(ReviewStatus::Pending);
                presentation.create_draft(slide.id(), options.instruction.clone(), None, metadata)?
            } else {
                if slide.is_draft() {
                    metadata.review_status = slide
                        .metadata()
                        .review_status
                        .clone()
                        .or(Some(ReviewStatus::Pending));
                }
                presentation.update_slide(slide.id(), options.instruction.clone(), None, metadata)?
            };

            path = images.rename_for_slide(&path, *entry.order(), entry.id()).await?;
            presentation.set_image_path(entry.id(), Some(path.clone()))?;
            workspace.project_store().save(presentation)?;
            presentation.find_slide(entry.id()).cloned()
        }
        _ => None,
    };

    info!(path = %path.display(), slide_id = ?slide.as_ref().map(|s| s.id()), "Edited slide");
    Ok(EditedSlide {
        source: target.source,
        path,
        slide,
        style,
    })
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
