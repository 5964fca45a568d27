//! Tests for single-slide generation.

mod test_utils;

use nanoslides::{
    GenerateOptions, GeminiErrorKind, NanoslidesErrorKind, StyleDefinition, generate_slide,
    suggest_slide_id,
};
use test_utils::{MockSlideEngine, project_in, workspace_in};

#[tokio::test]
async fn test_generate_without_project_only_writes_image() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = workspace_in(temp.path());
    let engine = MockSlideEngine::new_success();

    let generated =
        generate_slide(&engine, &workspace, &GenerateOptions::new("Team introductions")).await?;

    assert!(generated.slide().is_none());
    assert!(generated.path().is_file());
    assert!(generated.path().starts_with(temp.path().join("project").join("slides")));
    let name = generated.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("slide-"), "unexpected file name {name}");
    assert!(!workspace.project_store().exists());
    Ok(())
}

#[tokio::test]
async fn test_generate_records_slide_in_project() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let engine = MockSlideEngine::new_success();
    let prompt = "Quarterly revenue overview";

    let generated = generate_slide(&engine, &workspace, &GenerateOptions::new(prompt)).await?;

    let slide = generated.slide().as_ref().expect("slide recorded");
    assert_eq!(slide.id(), &suggest_slide_id(prompt, 3));
    assert_eq!(*slide.order(), 1);
    assert_eq!(slide.prompt(), prompt);
    assert_eq!(
        generated.path().file_name().unwrap().to_string_lossy(),
        format!("1_{}.png", slide.id())
    );

    let reloaded = workspace.project_store().load()?;
    let stored = reloaded.find_slide(slide.id()).expect("slide saved");
    assert_eq!(stored.image_path().as_deref(), Some(generated.path().as_path()));
    assert_eq!(stored.metadata().engine.as_deref(), Some("mock"));
    assert_eq!(stored.metadata().aspect_ratio.as_deref(), Some("16:9"));
    Ok(())
}

#[tokio::test]
async fn test_generate_appends_after_existing_slides() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let engine = MockSlideEngine::new_success();

    generate_slide(&engine, &workspace, &GenerateOptions::new("Opening")).await?;
    let second = generate_slide(&engine, &workspace, &GenerateOptions::new("Opening")).await?;

    let slide = second.slide().as_ref().expect("slide recorded");
    assert_eq!(slide.id(), "opening-2");
    assert_eq!(*slide.order(), 2);
    assert_eq!(workspace.project_store().load()?.main_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_generate_with_explicit_id_and_reference_file() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let notes = temp.path().join("project").join("notes.md");
    std::fs::write(&notes, "Revenue grew 12% year over year")?;

    let engine = MockSlideEngine::new_success();
    let options = GenerateOptions {
        slide_id: Some("revenue".to_string()),
        reference_files: vec![notes.clone()],
        ..GenerateOptions::new("Revenue highlights")
    };
    let generated = generate_slide(&engine, &workspace, &options).await?;

    let slide = generated.slide().as_ref().expect("slide recorded");
    assert_eq!(slide.id(), "revenue");
    assert_eq!(slide.prompt(), "Revenue highlights");
    assert_eq!(slide.metadata().reference_files, vec![notes.display().to_string()]);

    let sent = engine.prompts();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("Revenue highlights\n\n"));
    assert!(sent[0].contains("Revenue grew 12% year over year"));
    Ok(())
}

#[tokio::test]
async fn test_generate_uses_project_style() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let style = nanoslides::ProjectStyle {
        definition: StyleDefinition {
            base_prompt: "Muted earth tones".to_string(),
            ..Default::default()
        },
        style_id: None,
    };
    workspace.style_store().save_project(&style)?;

    let engine = MockSlideEngine::new_success();
    let generated = generate_slide(&engine, &workspace, &GenerateOptions::new("Roadmap")).await?;

    assert_eq!(generated.style().base_prompt, "Muted earth tones");
    assert_eq!(engine.styles()[0].base_prompt, "Muted earth tones");
    Ok(())
}

#[tokio::test]
async fn test_engine_failure_records_nothing() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let engine = MockSlideEngine::new_error(GeminiErrorKind::NoImage);

    let err = generate_slide(&engine, &workspace, &GenerateOptions::new("Broken"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), NanoslidesErrorKind::Gemini(_)));
    assert!(workspace.project_store().load()?.is_empty());
    assert!(!temp.path().join("project").join("slides").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_reference_file_fails_before_engine_call() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let engine = MockSlideEngine::new_success();
    let options = GenerateOptions {
        reference_files: vec!["missing.md".into()],
        ..GenerateOptions::new("Agenda")
    };

    let err = generate_slide(&engine, &workspace, &options).await.unwrap_err();

    assert!(matches!(err.kind(), NanoslidesErrorKind::Storage(_)));
    assert_eq!(engine.call_count(), 0);
    Ok(())
}
