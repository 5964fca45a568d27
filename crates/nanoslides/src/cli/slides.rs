//! Image command handlers: generate and edit.

use super::render::panel;
use nanoslides::{
    EditOptions, GenerateOptions, ImageModel, NanoBananaEngine, NanoslidesResult, ResolvedStyle,
    Workspace, edit_slide, generate_slide,
};

/// Generate one slide with the Nano Banana engine.
pub async fn generate(
    workspace: &Workspace,
    model: ImageModel,
    options: GenerateOptions,
) -> NanoslidesResult<()> {
    let engine = NanoBananaEngine::new(workspace.gemini_client()?, model);
    let generated = generate_slide(&engine, workspace, &options).await?;

    let mut lines = vec![
        "Slide generated".to_string(),
        format!("Model: {}", model),
        format!("Style: {}", style_label(generated.style())),
        format!("References: {}", generated.style().reference_images.len()),
        format!("Reference files: {}", options.reference_files.len()),
    ];
    if let Some(slide) = generated.slide() {
        lines.push(format!("Slide ID: {} (order {})", slide.id(), slide.order()));
    }
    lines.push(format!("Saved to {}", generated.path().display()));
    panel("nanoslides", &lines);
    Ok(())
}

/// Edit a slide image with the Nano Banana engine.
pub async fn edit(
    workspace: &Workspace,
    model: ImageModel,
    options: EditOptions,
) -> NanoslidesResult<()> {
    let engine = NanoBananaEngine::new(workspace.gemini_client()?, model);
    let edited = edit_slide(&engine, workspace, &options).await?;

    let source = match edited.slide() {
        Some(slide) => slide.draft_of().clone().unwrap_or_else(|| slide.id().clone()),
        None => edited.source().display().to_string(),
    };
    let heading = if options.draft { "Draft created" } else { "Slide edited" };

    let mut lines = vec![
        heading.to_string(),
        format!("Source: {}", source),
        format!("Model: {}", model),
        format!("Style: {}", style_label(edited.style())),
        format!("References: {}", edited.style().reference_images.len()),
    ];
    if options.draft
        && let Some(draft) = edited.slide()
    {
        lines.push(format!("Draft ID: {}", draft.id()));
        lines.push(format!(
            "Review with `nanoslides apply {0}` or `nanoslides discard {0}`",
            draft.id()
        ));
    }
    lines.push(format!("Saved to {}", edited.path().display()));
    panel("nanoslides", &lines);
    Ok(())
}

fn style_label(style: &ResolvedStyle) -> &str {
    style.style_id.as_deref().unwrap_or("project/default")
}
