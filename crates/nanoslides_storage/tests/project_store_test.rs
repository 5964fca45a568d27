use chrono::Utc;
use nanoslides_core::{NewSlide, Presentation, ReviewStatus, SlideMetadata};
use nanoslides_storage::{CURRENT_SCHEMA_VERSION, ProjectStore};
use std::path::PathBuf;

fn sample_deck() -> anyhow::Result<Presentation> {
    let mut deck = Presentation::new("Quarterly review", Utc::now(), "nanobanana");
    deck.add_slide(NewSlide::new("Revenue overview").with_image_path("slides/1_revenue.png"))?;
    deck.add_slide(NewSlide::new("Hiring plan"))?;
    let metadata = SlideMetadata {
        review_status: Some(ReviewStatus::Pending),
        ..Default::default()
    };
    deck.create_draft("revenue-overview", "Make it blue", None, metadata)?;
    Ok(deck)
}

#[test]
fn save_then_load_preserves_slides() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ProjectStore::new(dir.path().join("slides.yaml"));
    let deck = sample_deck()?;

    store.save(&deck)?;
    let loaded = store.load()?;

    assert_eq!(loaded.name(), deck.name());
    assert_eq!(loaded.engine(), deck.engine());
    assert_eq!(loaded.slides().len(), 3);
    let ids: Vec<_> = loaded.ordered_main().iter().map(|s| s.id().clone()).collect();
    assert_eq!(ids, vec!["revenue-overview", "hiring-plan"]);

    let drafts = loaded.drafts_of("revenue-overview");
    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].metadata().is_pending_review());
    Ok(())
}

#[test]
fn save_writes_schema_version() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    ProjectStore::new(&path).save(&sample_deck()?)?;

    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.contains(&format!("schema_version: {}", CURRENT_SCHEMA_VERSION)));
    assert!(!dir.path().join("slides.tmp").exists());
    Ok(())
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProjectStore::new(dir.path().join("slides.yaml"));
    assert!(!store.exists());
    let err = store.load().unwrap_err();
    assert!(err.to_string().contains("Not found"));
}

#[test]
fn load_rejects_future_schema() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        "schema_version: 99\nname: x\ncreated_at: 2025-01-01T00:00:00Z\nengine: nanobanana\nslides: []\n",
    )?;
    let err = ProjectStore::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("unsupported schema_version 99"));
    Ok(())
}

#[test]
fn load_rejects_inconsistent_draft_fields() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        r#"schema_version: 2
name: x
created_at: 2025-01-01T00:00:00Z
engine: nanobanana
slides:
  - id: intro
    order: 1
    prompt: Intro
    is_draft: true
"#,
    )?;
    let err = ProjectStore::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("inconsistent draft fields"));
    Ok(())
}

#[test]
fn legacy_file_is_migrated() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        r#"name: Legacy deck
created_at: 2024-05-01T12:00:00Z
engine: nanobanana
slides:
  - prompt: Company vision overview
    image_path: slides/slide-1.png
    metadata:
      model: gemini-2.5-flash-image
      custom_key: kept
  - prompt: Company vision overview
  - id: closing
    prompt: Thank you
  - prompt: Orphan draft
    is_draft: true
"#,
    )?;

    let store = ProjectStore::new(&path);
    let deck = store.load()?;

    let main: Vec<_> = deck
        .ordered_main()
        .iter()
        .map(|s| (s.id().clone(), *s.order()))
        .collect();
    assert_eq!(
        main,
        vec![
            ("company-vision-overview".to_string(), 1),
            ("company-vision-overview-2".to_string(), 2),
            ("closing".to_string(), 3),
            ("orphan-draft".to_string(), 4),
        ]
    );

    let first = deck.find_slide("company-vision-overview").unwrap();
    assert_eq!(first.image_path(), &Some(PathBuf::from("slides/slide-1.png")));
    assert_eq!(first.metadata().model.as_deref(), Some("gemini-2.5-flash-image"));
    assert_eq!(
        first.metadata().extra.get("custom_key"),
        Some(&serde_json::Value::String("kept".to_string()))
    );

    store.save(&deck)?;
    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.starts_with("schema_version: 2"));
    assert!(raw.contains("custom_key: kept"));
    assert_eq!(store.load()?.slides().len(), 4);
    Ok(())
}

#[test]
fn load_rejects_repeated_slide_ids() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        r#"schema_version: 2
name: x
created_at: 2025-01-01T00:00:00Z
engine: nanobanana
slides:
  - id: intro
    order: 1
    prompt: Intro
  - id: intro
    order: 2
    prompt: Intro again
"#,
    )?;
    let err = ProjectStore::new(&path).load().unwrap_err();
    assert!(err.to_string().contains("slide id 'intro' appears more than once"));
    Ok(())
}

#[test]
fn load_drops_drafts_without_a_main_source() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        r#"schema_version: 2
name: x
created_at: 2025-01-01T00:00:00Z
engine: nanobanana
slides:
  - id: intro
    order: 1
    prompt: Intro
  - id: ghost-draft
    order: 1
    prompt: Haunted
    is_draft: true
    draft_of: ghost
  - id: intro-draft
    order: 7
    prompt: Intro, brighter
    is_draft: true
    draft_of: intro
"#,
    )?;
    let mut deck = ProjectStore::new(&path).load()?;

    assert!(deck.find_slide("ghost-draft").is_none());
    assert_eq!(deck.slides().len(), 2);
    assert_eq!(deck.find_slide("intro-draft").map(|s| *s.order()), Some(1));
    deck.apply_draft("intro-draft")?;
    assert_eq!(deck.find_slide("intro").unwrap().prompt(), "Intro, brighter");
    Ok(())
}

#[test]
fn legacy_drafts_follow_their_renamed_source() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slides.yaml");
    std::fs::write(
        &path,
        r#"name: Legacy deck
created_at: 2024-05-01T12:00:00Z
engine: nanobanana
slides:
  - id: Opening
    order: 3
    prompt: Opening
  - id: " Intro "
    order: 8
    prompt: Intro
  - id: Intro-draft
    prompt: Intro, in blue
    is_draft: true
    draft_of: " Intro "
"#,
    )?;

    let mut deck = ProjectStore::new(&path).load()?;

    let draft = deck.find_slide("intro-draft").unwrap();
    assert!(draft.is_draft());
    assert_eq!(draft.draft_of(), &Some("intro".to_string()));
    let source_order = *deck.find_slide("intro").unwrap().order();
    assert_eq!(source_order, 2);
    assert_eq!(*draft.order(), source_order);

    let (updated, _) = deck.apply_draft("intro-draft")?;
    assert_eq!(updated.prompt(), "Intro, in blue");
    assert_eq!(deck.ordered_main().len(), 2);
    Ok(())
}
