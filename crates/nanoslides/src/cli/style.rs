//! Style command handlers.

use super::commands::StyleCommands;
use super::render::{Table, panel, truncate};
use nanoslides::{
    JsonError, NanoslidesResult, ProjectStyle, StorageError, StorageErrorKind, StyleError,
    StyleErrorKind, Workspace, normalize_reference_path, normalize_style_id,
};
use tracing::debug;

/// Handle style subcommands.
pub fn handle_style_command(workspace: &Workspace, cmd: StyleCommands) -> NanoslidesResult<()> {
    match cmd {
        StyleCommands::Show { style_id } => show(workspace, style_id.as_deref()),
        StyleCommands::Set {
            base_prompt,
            negative_prompt,
            references,
            comments,
            style_id,
            clear,
        } => set(
            workspace,
            StyleUpdate {
                base_prompt,
                negative_prompt,
                references,
                comments,
                style_id,
                clear,
            },
        ),
        StyleCommands::SaveGlobal { name } => save_global(workspace, &name),
        StyleCommands::List => list(workspace),
        StyleCommands::Remove { name } => remove(workspace, &name),
    }
}

struct StyleUpdate {
    base_prompt: Option<String>,
    negative_prompt: Option<String>,
    references: Vec<String>,
    comments: Vec<String>,
    style_id: Option<String>,
    clear: bool,
}

fn show(workspace: &Workspace, style_id: Option<&str>) -> NanoslidesResult<()> {
    let style = workspace.resolve_style(style_id, &[])?;
    let json = serde_json::to_string_pretty(&style).map_err(|e| JsonError::new("resolved style", e))?;
    println!("{}", json);
    Ok(())
}

fn set(workspace: &Workspace, update: StyleUpdate) -> NanoslidesResult<()> {
    let store = workspace.style_store();
    let mut style = if update.clear {
        ProjectStyle::default()
    } else {
        store.load_project()?.unwrap_or_default()
    };

    if let Some(base_prompt) = update.base_prompt {
        style.definition.base_prompt = base_prompt;
    }
    if let Some(negative_prompt) = update.negative_prompt {
        style.definition.negative_prompt = negative_prompt;
    }
    if !update.references.is_empty() {
        style.definition.reference_images = update.references;
    }
    if !update.comments.is_empty() {
        style.definition.reference_comments = update.comments;
    }
    if let Some(requested) = update.style_id {
        let style_id = normalize_style_id(Some(&requested));
        if let Some(id) = &style_id
            && store.load_registry()?.get(id).is_none()
        {
            return Err(StyleError::new(StyleErrorKind::UnknownStyle(id.clone())).into());
        }
        style.style_id = style_id;
    }

    store.save_project(&style)?;
    debug!(style_id = ?style.style_id, "Updated project style");
    panel(
        "nanoslides",
        &[
            "Saved project style".to_string(),
            format!("File: {}", store.project_path().display()),
            format!("Global style: {}", style.style_id.as_deref().unwrap_or("none")),
            format!("References: {}", style.definition.reference_images.len()),
        ],
    );
    Ok(())
}

fn save_global(workspace: &Workspace, name: &str) -> NanoslidesResult<()> {
    let store = workspace.style_store();
    let project = store.load_project()?.ok_or_else(|| {
        StorageError::new(StorageErrorKind::NotFound(format!(
            "{}. Create one with `nanoslides style set` first",
            store.project_path().display()
        )))
    })?;

    // Registry references are stored as absolute paths.
    let mut definition = project.definition;
    definition.reference_images = definition
        .reference_images
        .iter()
        .filter_map(|raw| normalize_reference_path(raw, store.project_dir()))
        .map(|path| path.display().to_string())
        .collect();

    let id = store.set_global(name, definition)?;
    panel(
        "nanoslides",
        &[
            "Saved global style".to_string(),
            format!("ID: {}", id),
            format!("File: {}", store.global_path().display()),
        ],
    );
    Ok(())
}

fn list(workspace: &Workspace) -> NanoslidesResult<()> {
    let registry = workspace.style_store().load_registry()?;
    if registry.is_empty() {
        println!("No global styles saved.");
        return Ok(());
    }

    let mut table = Table::new("Global styles", &["ID", "Base prompt", "References"]);
    for (id, definition) in &registry.styles {
        table.row([
            id.clone(),
            truncate(&definition.base_prompt, 60),
            definition.reference_images.len().to_string(),
        ]);
    }
    print!("{}", table);
    Ok(())
}

fn remove(workspace: &Workspace, name: &str) -> NanoslidesResult<()> {
    let store = workspace.style_store();
    store.remove_global(name)?;
    panel(
        "nanoslides",
        &[
            "Removed global style".to_string(),
            format!("ID: {}", name.trim()),
            format!("File: {}", store.global_path().display()),
        ],
    );
    Ok(())
}
