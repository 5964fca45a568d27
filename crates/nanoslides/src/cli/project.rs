//! Project state command handlers: init, list, remove, move, clearall,
//! apply and discard.

use super::commands::OutputFormat;
use super::render::{Table, image_label, panel, slide_order_table, truncate};
use chrono::Utc;
use nanoslides::{
    JsonError, NanoslidesResult, Presentation, SlideEntry, SlideError, SlideErrorKind,
    StorageError, StorageErrorKind, Workspace,
};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Load `slides.yaml`, pointing at `nanoslides init` when it is missing.
fn load_project(workspace: &Workspace) -> NanoslidesResult<Presentation> {
    let store = workspace.project_store();
    if !store.exists() {
        return Err(StorageError::new(StorageErrorKind::NotFound(format!(
            "{}. Run `nanoslides init` first",
            store.path().display()
        )))
        .into());
    }
    store.load()
}

/// Create `slides.yaml` in the project directory or in `./NAME`.
pub fn init(workspace: &Workspace, name: Option<String>, force: bool) -> NanoslidesResult<()> {
    let paths = match &name {
        Some(name) => workspace
            .paths()
            .with_project_dir(workspace.paths().project_dir().join(name)),
        None => workspace.paths().clone(),
    };
    let workspace = Workspace::new(paths, workspace.config().clone());
    let store = workspace.project_store();

    if store.path().exists() && !force {
        return Err(StorageError::new(StorageErrorKind::AlreadyExists(format!(
            "{}. Use --force to overwrite",
            store.path().display()
        )))
        .into());
    }

    let project_name = name.unwrap_or_else(|| {
        workspace
            .paths()
            .project_dir()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "slides".to_string())
    });
    let presentation = Presentation::new(
        project_name.clone(),
        Utc::now(),
        workspace.config().default_engine.clone(),
    );
    store.save(&presentation)?;

    info!(name = %project_name, "Initialized project");
    println!(
        "Initialized slides project '{}' at {}",
        project_name,
        store.path().display()
    );
    Ok(())
}

/// Print the slides, optionally with drafts.
pub fn list(workspace: &Workspace, all: bool, format: OutputFormat) -> NanoslidesResult<()> {
    let presentation = load_project(workspace)?;
    let slides = if all {
        presentation.ordered_all()
    } else {
        presentation.ordered_main()
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&slides)
                .map_err(|e| JsonError::new("slide list", e))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            let mut table = Table::new(
                format!("Slides in '{}'", presentation.name()),
                &["Order", "ID", "Type", "Path", "Prompt"],
            );
            for slide in &slides {
                table.row([
                    slide.order().to_string(),
                    slide.id().clone(),
                    slide_type(slide),
                    image_label(slide),
                    truncate(slide.prompt(), 60),
                ]);
            }
            print!("{}", table);
            println!("Total: {} slides", slides.len());
        }
    }
    Ok(())
}

/// Remove a slide (and, for a main slide, its drafts).
pub fn remove(workspace: &Workspace, slide_id: &str) -> NanoslidesResult<()> {
    let mut presentation = load_project(workspace)?;
    let removed = presentation
        .remove_slide(slide_id)
        .ok_or_else(|| SlideError::new(SlideErrorKind::NotFound(slide_id.to_string())))?;
    workspace.project_store().save(&presentation)?;

    let heading = if removed.is_draft() { "Removed draft" } else { "Removed slide" };
    panel(
        "nanoslides",
        &[
            heading.to_string(),
            format!("ID: {}", removed.id()),
            format!("Previous order: {}", removed.order()),
        ],
    );
    print!("{}", slide_order_table("Updated slide order", &presentation.ordered_main()));
    Ok(())
}

/// Move a main slide to a 1-based position.
pub fn move_slide(workspace: &Workspace, slide_id: &str, new_pos: usize) -> NanoslidesResult<()> {
    let mut presentation = load_project(workspace)?;
    if presentation.main_count() == 0 {
        return Err(SlideError::new(SlideErrorKind::InvalidArgument(
            "no slides found in project".to_string(),
        ))
        .into());
    }

    let (from, to) = presentation.move_slide(slide_id, new_pos)?;
    if from == to {
        println!("Slide '{}' is already at position {}.", slide_id, to);
        return Ok(());
    }
    workspace.project_store().save(&presentation)?;

    panel(
        "nanoslides",
        &[
            "Moved slide".to_string(),
            format!("ID: {}", slide_id),
            format!("From: {}", from),
            format!("To: {}", to),
        ],
    );
    print!("{}", slide_order_table("Updated slide order", &presentation.ordered_main()));
    Ok(())
}

/// Delete every slide after confirmation.
pub fn clear_all(workspace: &Workspace, yes: bool) -> NanoslidesResult<()> {
    let mut presentation = load_project(workspace)?;
    if presentation.is_empty() {
        println!("No slides to delete.");
        return Ok(());
    }

    let mut table = Table::new("Slides to delete", &["Order", "ID", "Type", "Path"]);
    for slide in presentation.ordered_all() {
        table.row([
            slide.order().to_string(),
            slide.id().clone(),
            slide_type(slide),
            image_label(slide),
        ]);
    }
    print!("{}", table);

    let count = presentation.slides().len();
    if !yes {
        let question = format!(
            "Delete all {} slides from slides.yaml? This cannot be undone.",
            count
        );
        if !confirm(&question) {
            println!("Cancelled. No slides were deleted.");
            return Ok(());
        }
    }

    let deleted = presentation.clear();
    workspace.project_store().save(&presentation)?;
    panel(
        "nanoslides",
        &[
            "Cleared all slides".to_string(),
            format!("Deleted: {}", deleted),
            format!("Project file: {}", workspace.project_store().path().display()),
        ],
    );
    Ok(())
}

/// Replace a draft's source slide with the draft.
pub fn apply(workspace: &Workspace, draft_id: &str) -> NanoslidesResult<()> {
    let mut presentation = load_project(workspace)?;
    let (updated, draft) = presentation.apply_draft(draft_id)?;
    workspace.project_store().save(&presentation)?;

    panel(
        "nanoslides",
        &[
            "Applied draft".to_string(),
            format!("Draft: {}", draft.id()),
            format!("Slide: {} (order {})", updated.id(), updated.order()),
            format!("Image: {}", image_label(&updated)),
        ],
    );
    Ok(())
}

/// Drop a draft without touching its source.
pub fn discard(workspace: &Workspace, draft_id: &str) -> NanoslidesResult<()> {
    let mut presentation = load_project(workspace)?;
    let draft = presentation.discard_draft(draft_id)?;
    workspace.project_store().save(&presentation)?;

    panel(
        "nanoslides",
        &[
            "Discarded draft".to_string(),
            format!("Draft: {}", draft.id()),
            format!("Slide: {}", draft.draft_of().as_deref().unwrap_or("-")),
        ],
    );
    Ok(())
}

fn slide_type(slide: &SlideEntry) -> String {
    match slide.draft_of() {
        Some(source) if slide.is_draft() => format!("draft of {}", source),
        _ => "main".to_string(),
    }
}

fn confirm(question: &str) -> bool {
    print!("{} [y/N]: ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
