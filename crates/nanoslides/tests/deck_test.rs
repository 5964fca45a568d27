//! Tests for deck planning and generation.

mod test_utils;

use nanoslides::{
    DeckOptions, GeminiErrorKind, NanoslidesErrorKind, ProjectStyle, SlideErrorKind,
    StyleDefinition, generate_deck, plan_deck,
};
use test_utils::{MockPlanner, MockSlideEngine, project_in, workspace_in};

#[tokio::test]
async fn test_deck_generates_every_planned_slide() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let planner = MockPlanner::with_titles(&["Intro", "Market", "Roadmap"]);
    let engine = MockSlideEngine::new_success();
    let options = DeckOptions::new("Pitch our product to investors");

    let plan = plan_deck(&planner, &workspace, &options).await?;
    assert!(*plan.inferred());
    assert_eq!(plan.style().base_prompt, "Clean flat illustration");
    assert_eq!(plan.style().negative_prompt, "Photographs");

    let outcome = generate_deck(&engine, &workspace, &plan, &options).await?;

    assert_eq!(outcome.rows().len(), 3);
    assert_eq!(engine.call_count(), 3);
    assert_eq!(
        engine.prompts(),
        vec!["Slide about intro", "Slide about market", "Slide about roadmap"]
    );
    assert!(
        engine
            .styles()
            .iter()
            .all(|style| style.base_prompt == "Clean flat illustration")
    );

    let presentation = workspace.project_store().load()?;
    let slides = presentation.ordered_main();
    assert_eq!(slides.len(), 3);
    for (position, (slide, row)) in slides.iter().zip(outcome.rows()).enumerate() {
        let index = position + 1;
        assert_eq!(*row.index(), index);
        assert_eq!(row.slide_id().as_ref(), Some(slide.id()));
        assert_eq!(*slide.order() as usize, index);
        assert_eq!(slide.metadata().deck_title.as_deref(), Some("Mock deck"));
        assert_eq!(slide.metadata().deck_slide_index, Some(index as u32));
        assert_eq!(slide.metadata().deck_slide_title.as_deref(), Some(row.title().as_str()));
        let name = row.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(&format!("{}_", index)), "unexpected file name {name}");
        assert!(row.path().is_file());
        assert!(row.generate_command().starts_with("nanoslides generate \"Slide about"));
    }
    Ok(())
}

#[tokio::test]
async fn test_deck_without_project_only_writes_images() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = workspace_in(temp.path());
    let planner = MockPlanner::with_titles(&["Intro", "Close"]);
    let engine = MockSlideEngine::new_success();
    let options = DeckOptions::new("Team offsite agenda");

    let plan = plan_deck(&planner, &workspace, &options).await?;
    let outcome = generate_deck(&engine, &workspace, &plan, &options).await?;

    assert_eq!(outcome.rows().len(), 2);
    assert!(outcome.rows().iter().all(|row| row.slide_id().is_none()));
    let name = outcome.rows()[0].path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("slide-01-"), "unexpected file name {name}");
    assert!(!workspace.project_store().exists());
    Ok(())
}

#[tokio::test]
async fn test_deck_failure_keeps_generated_slides() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let planner = MockPlanner::with_titles(&["One", "Two", "Three", "Four"]);
    let engine = MockSlideEngine::new_succeed_then_fail(
        2,
        GeminiErrorKind::HttpError {
            status_code: 503,
            message: "overloaded".to_string(),
        },
    );
    let options = DeckOptions::new("Four slide deck");

    let plan = plan_deck(&planner, &workspace, &options).await?;
    let err = generate_deck(&engine, &workspace, &plan, &options)
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), NanoslidesErrorKind::Gemini(_)));
    assert_eq!(engine.call_count(), 3);
    let presentation = workspace.project_store().load()?;
    assert_eq!(presentation.main_count(), 2);
    for slide in presentation.ordered_main() {
        let path = slide.image_path().as_ref().expect("saved slide has an image");
        assert!(path.is_file(), "missing image {}", path.display());
    }
    Ok(())
}

#[tokio::test]
async fn test_project_style_wins_over_inferred_style() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    workspace.style_store().save_project(&ProjectStyle {
        definition: StyleDefinition {
            base_prompt: "Watercolor".to_string(),
            ..Default::default()
        },
        style_id: None,
    })?;
    let planner = MockPlanner::with_titles(&["Intro"]);

    let plan = plan_deck(&planner, &workspace, &DeckOptions::new("Gardening tips")).await?;

    assert!(!*plan.inferred());
    assert_eq!(plan.style().base_prompt, "Watercolor");
    assert_eq!(planner.styles()[0].base_prompt, "Watercolor");
    Ok(())
}

#[tokio::test]
async fn test_plan_request_carries_options() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = project_in(temp.path())?;
    let notes = workspace.paths().project_dir().join("notes.md");
    std::fs::write(&notes, "Revenue grew 40% year over year.")?;
    let planner = MockPlanner::with_titles(&["Intro"]);
    let options = DeckOptions {
        audience: Some("Board members".to_string()),
        slide_count: Some(5),
        reference_files: vec![notes.clone()],
        ..DeckOptions::new("  Annual results  ")
    };

    let plan = plan_deck(&planner, &workspace, &options).await?;

    let request = &planner.requests()[0];
    assert_eq!(request.prompt(), "Annual results");
    assert_eq!(request.language(), "en");
    assert_eq!(request.audience().as_deref(), Some("Board members"));
    assert_eq!(*request.slide_count(), Some(5));
    assert_eq!(*request.reference_file_count(), 1);
    assert!(request.reference_context().contains("Revenue grew 40%"));
    assert_eq!(plan.reference_files().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_blank_prompt_is_rejected() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = workspace_in(temp.path());
    let planner = MockPlanner::with_titles(&["Intro"]);

    let err = plan_deck(&planner, &workspace, &DeckOptions::new("   "))
        .await
        .unwrap_err();

    assert!(matches!(err.slide_kind(), Some(SlideErrorKind::InvalidArgument(_))));
    assert!(planner.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_slide_count_out_of_range_is_rejected() -> anyhow::Result<()> {
    let temp = tempfile::tempdir()?;
    let workspace = workspace_in(temp.path());
    let planner = MockPlanner::with_titles(&["Intro"]);

    for count in [0, 41] {
        let options = DeckOptions {
            slide_count: Some(count),
            ..DeckOptions::new("Anything")
        };
        let err = plan_deck(&planner, &workspace, &options).await.unwrap_err();
        assert!(matches!(err.slide_kind(), Some(SlideErrorKind::InvalidArgument(_))));
    }
    assert!(planner.requests().is_empty());
    Ok(())
}
