//! Deck command handler.

use super::render::{Table, panel, truncate};
use nanoslides::{
    DeckOptions, GeminiPlanner, ImageModel, NanoBananaEngine, NanoslidesResult, Workspace,
    generate_deck, plan_deck,
};

const PROMPT_PREVIEW_CHARS: usize = 96;

/// Plan a deck, show the plan, then generate every slide.
pub async fn deck(
    workspace: &Workspace,
    model: ImageModel,
    options: DeckOptions,
) -> NanoslidesResult<()> {
    let client = workspace.gemini_client()?;
    let planner = GeminiPlanner::new(client.clone());
    let engine = NanoBananaEngine::new(client, model);

    let plan = plan_deck(&planner, workspace, &options).await?;
    let deck = plan.planned().plan();

    let mut table = Table::new(
        format!("Planned deck: {}", deck.deck_title),
        &["#", "Slide", "Prompt preview"],
    );
    for (index, slide) in deck.slides.iter().enumerate() {
        table.row([
            (index + 1).to_string(),
            slide.title.clone(),
            truncate(&slide.prompt, PROMPT_PREVIEW_CHARS),
        ]);
    }
    print!("{}", table);

    let summary = if deck.planning_summary.trim().is_empty() {
        "(none)"
    } else {
        deck.planning_summary.as_str()
    };
    panel(
        "Plan summary",
        &[
            format!("Audience: {}", options.audience.as_deref().unwrap_or("general")),
            format!("Use case: {}", options.use_case.as_deref().unwrap_or("general")),
            format!(
                "Style: {}",
                plan.style().style_id.as_deref().unwrap_or("inferred/default")
            ),
            format!("Summary: {}", summary),
        ],
    );

    let outcome = generate_deck(&engine, workspace, &plan, &options).await?;

    let mut generated = Table::new(
        "Generated deck",
        &["#", "Slide", "ID", "Path", "Equivalent generate call"],
    );
    for row in outcome.rows() {
        generated.row([
            row.index().to_string(),
            row.title().clone(),
            row.slide_id().clone().unwrap_or_else(|| "-".to_string()),
            row.path().display().to_string(),
            row.generate_command().clone(),
        ]);
    }
    print!("{}", generated);

    panel(
        "nanoslides",
        &[
            "Presentation generated".to_string(),
            format!("Slides: {}", outcome.rows().len()),
            format!("Planner: {}", plan.planned().model()),
            format!("Generator model: {}", model),
            format!("Reference files: {}", plan.reference_files().len()),
            format!("Output dir: {}", outcome.output_dir().display()),
        ],
    );
    Ok(())
}
