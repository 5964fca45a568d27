use nanoslides_core::{ProjectStyle, StyleDefinition, StyleResolver};
use nanoslides_error::{NanoslidesErrorKind, StyleErrorKind};
use nanoslides_storage::{NanoslidesPaths, StyleStore};

fn store_in(dir: &std::path::Path) -> StyleStore {
    let paths = NanoslidesPaths::new(dir.join("project"), dir.join("global"));
    StyleStore::new(paths.style_file(), paths.styles_file())
}

fn style_kind(err: &nanoslides_error::NanoslidesError) -> Option<&StyleErrorKind> {
    match err.kind() {
        NanoslidesErrorKind::Style(e) => Some(&e.kind),
        _ => None,
    }
}

#[test]
fn missing_files_load_as_empty() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store_in(dir.path());
    assert!(store.load_project()?.is_none());
    assert!(store.load_registry()?.is_empty());
    Ok(())
}

#[test]
fn project_style_round_trips_through_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store_in(dir.path());
    let style = ProjectStyle {
        definition: StyleDefinition {
            base_prompt: "Flat pastel illustrations".to_string(),
            negative_prompt: "photorealism".to_string(),
            reference_images: vec!["refs/palette.png".to_string()],
            reference_comments: vec!["Soft shadows".to_string()],
        },
        style_id: Some("pastel".to_string()),
    };

    store.save_project(&style)?;
    assert_eq!(store.load_project()?, Some(style));

    let raw = std::fs::read_to_string(store.project_path())?;
    assert!(raw.ends_with("}\n"));
    assert!(raw.contains("\"base_prompt\": \"Flat pastel illustrations\""));
    Ok(())
}

#[test]
fn set_and_remove_global_styles() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store_in(dir.path());
    let definition = StyleDefinition {
        base_prompt: "Dark noir".to_string(),
        ..Default::default()
    };

    let id = store.set_global("  noir ", definition.clone())?;
    assert_eq!(id, "noir");
    let registry = store.load_registry()?;
    assert_eq!(registry.get("noir"), Some(&definition));

    let removed = store.remove_global("noir")?;
    assert_eq!(removed, definition);
    assert!(store.load_registry()?.is_empty());
    Ok(())
}

#[test]
fn reserved_and_blank_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let err = store.set_global("default", StyleDefinition::default()).unwrap_err();
    assert!(matches!(
        style_kind(&err),
        Some(StyleErrorKind::InvalidStyleId { .. })
    ));

    let err = store.set_global("   ", StyleDefinition::default()).unwrap_err();
    assert!(matches!(style_kind(&err), Some(StyleErrorKind::MissingStyleId)));
}

#[test]
fn removing_unknown_style_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let err = store.remove_global("ghost").unwrap_err();
    assert!(matches!(
        style_kind(&err),
        Some(StyleErrorKind::UnknownStyle(id)) if id == "ghost"
    ));
}

#[test]
fn corrupt_registry_is_a_parse_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store_in(dir.path());
    std::fs::create_dir_all(store.global_dir().unwrap())?;
    std::fs::write(store.global_path(), "{ not json")?;
    let err = store.load_registry().unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
    Ok(())
}

#[test]
fn references_resolve_against_their_scope() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = store_in(dir.path());
    store.set_global(
        "brand",
        StyleDefinition {
            reference_images: vec!["logo.png".to_string()],
            ..Default::default()
        },
    )?;
    store.save_project(&ProjectStyle {
        definition: StyleDefinition {
            reference_images: vec!["./art/hero.png".to_string()],
            ..Default::default()
        },
        style_id: Some("brand".to_string()),
    })?;

    let registry = store.load_registry()?;
    let project = store.load_project()?.unwrap();
    let resolved = StyleResolver::new()
        .with_registry(&registry, store.global_dir())
        .with_project(&project, store.project_dir())
        .resolve(None);

    assert_eq!(
        resolved.reference_images,
        vec![
            dir.path().join("global").join("logo.png"),
            dir.path().join("project").join("art").join("hero.png"),
        ]
    );
    Ok(())
}
