//! Whole-deck generation: plan once, then generate every planned slide.

use crate::Workspace;
use nanoslides_core::{
    AspectRatio, GenerateSlideRequest, Level, MAX_PLANNED_SLIDES, NewSlide, PlanRequest,
    Presentation, ResolvedStyle,
};
use nanoslides_error::{
    BuilderError, BuilderErrorKind, NanoslidesResult, SlideError, SlideErrorKind,
};
use nanoslides_interface::{PlannedDeck, PresentationPlanner, SlideEngine};
use nanoslides_storage::{
    ImageStore, read_reference_files, reference_context, resolve_reference_files,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Inputs of `nanoslides deck`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckOptions {
    /// Deck objective
    pub prompt: String,
    /// Intended audience
    pub audience: Option<String>,
    /// Where the deck will be used
    pub use_case: Option<String>,
    /// Talk length
    pub duration_minutes: Option<u32>,
    /// Exact number of slides wanted
    pub slide_count: Option<usize>,
    /// How technical the content should be
    pub detail_level: Level,
    /// How illustration-heavy the visuals should be
    pub illustration_level: Level,
    /// Content language, `en` when blank
    pub language: String,
    /// Global style override
    pub style_id: Option<String>,
    /// Extra style reference images
    pub references: Vec<PathBuf>,
    /// Text files given to the planner
    pub reference_files: Vec<PathBuf>,
    /// Aspect ratio of every slide
    pub aspect_ratio: AspectRatio,
    /// Where to write the images
    pub output_dir: Option<PathBuf>,
}

impl DeckOptions {
    /// Options with only a prompt set.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            language: "en".to_string(),
            ..Default::default()
        }
    }
}

/// A plan ready to be generated.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct DeckPlan {
    /// Planner output
    planned: PlannedDeck,
    /// Style every slide is generated with
    style: ResolvedStyle,
    /// Reference text files the planner saw
    reference_files: Vec<PathBuf>,
    /// Whether the planner's inferred style was applied
    inferred: bool,
}

/// One generated slide of a deck.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct DeckRow {
    /// 1-based position in the plan
    index: usize,
    /// Planned title
    title: String,
    /// Project slide id, when a project exists
    slide_id: Option<String>,
    /// Image location
    path: PathBuf,
    /// `nanoslides generate` call that would produce the same slide
    generate_command: String,
}

/// Result of [`generate_deck`].
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct DeckOutcome {
    /// Generated slides, in plan order
    rows: Vec<DeckRow>,
    /// Directory the images were written to
    output_dir: PathBuf,
}

/// Ask the planner for a deck.
///
/// The style is resolved first. When nothing contributes any style context
/// the planner's inferred style is used for the whole deck.
///
/// # Errors
///
/// - `InvalidArgument` for a blank prompt or a slide count outside `1..=40`
/// - storage errors for unreadable reference files or style files
/// - whatever the planner reports
#[instrument(skip_all, fields(slide_count = ?options.slide_count))]
pub async fn plan_deck(
    planner: &dyn PresentationPlanner,
    workspace: &Workspace,
    options: &DeckOptions,
) -> NanoslidesResult<DeckPlan> {
    let prompt = options.prompt.trim();
    if prompt.is_empty() {
        return Err(SlideError::new(SlideErrorKind::InvalidArgument(
            "presentation prompt is required".to_string(),
        ))
        .into());
    }
    if let Some(count) = options.slide_count
        && !(1..=MAX_PLANNED_SLIDES).contains(&count)
    {
        return Err(SlideError::new(SlideErrorKind::InvalidArgument(format!(
            "slide count must be between 1 and {}, got {}",
            MAX_PLANNED_SLIDES, count
        )))
        .into());
    }

    let project_dir = workspace.paths().project_dir().as_path();
    let reference_paths = resolve_reference_files(&options.reference_files, Some(project_dir));
    let files = read_reference_files(&reference_paths)?;

    let language = match options.language.trim() {
        "" => "en",
        language => language,
    };
    let mut builder = PlanRequest::builder();
    builder
        .prompt(prompt)
        .detail_level(options.detail_level)
        .illustration_level(options.illustration_level)
        .language(language)
        .reference_file_count(files.len())
        .reference_context(reference_context(&files));
    if let Some(audience) = &options.audience {
        builder.audience(audience.clone());
    }
    if let Some(use_case) = &options.use_case {
        builder.use_case(use_case.clone());
    }
    if let Some(minutes) = options.duration_minutes {
        builder.duration_minutes(minutes);
    }
    if let Some(count) = options.slide_count {
        builder.slide_count(count);
    }
    let request = builder
        .build()
        .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))?;

    let style = workspace.resolve_style(options.style_id.as_deref(), &options.references)?;
    let planned = planner.plan(&request, &style).await?;

    let effective = style.clone().with_inferred(
        &planned.plan().inferred_style_base_prompt,
        &planned.plan().inferred_style_negative_prompt,
    );
    let inferred = effective != style;
    if inferred {
        debug!("No style context, using the planner's inferred style");
    }
    let style = effective;

    info!(
        deck_title = %planned.plan().deck_title,
        slides = planned.plan().slides.len(),
        model = %planned.model(),
        "Planned deck"
    );
    Ok(DeckPlan {
        planned,
        style,
        reference_files: reference_paths,
        inferred,
    })
}

/// Generate every slide of `plan` in order.
///
/// Inside a project each slide is appended as a main slide carrying the
/// deck title, its position and its planned title. The project is saved
/// once at the end, and also when a generation fails part way so the
/// slides already produced are kept.
///
/// # Errors
///
/// Returns the first engine or storage failure.
#[instrument(skip_all, fields(slides = plan.planned.plan().slides.len()))]
pub async fn generate_deck(
    engine: &dyn SlideEngine,
    workspace: &Workspace,
    plan: &DeckPlan,
    options: &DeckOptions,
) -> NanoslidesResult<DeckOutcome> {
    let mut presentation = workspace.load_project_if_present()?;
    let images = workspace.image_store(options.output_dir.as_deref());

    let mut rows = Vec::new();
    let outcome = generate_rows(
        engine,
        &images,
        presentation.as_mut(),
        plan,
        options.aspect_ratio,
        &mut rows,
    )
    .await;

    if let Some(presentation) = &presentation
        && (outcome.is_ok() || !rows.is_empty())
    {
        if outcome.is_err() {
            warn!(saved = rows.len(), "Deck generation failed, saving slides produced so far");
        }
        workspace.project_store().save(presentation)?;
    }
    outcome?;

    Ok(DeckOutcome {
        rows,
        output_dir: images.output_dir().to_path_buf(),
    })
}

async fn generate_rows(
    engine: &dyn SlideEngine,
    images: &ImageStore,
    mut presentation: Option<&mut Presentation>,
    plan: &DeckPlan,
    aspect_ratio: AspectRatio,
    rows: &mut Vec<DeckRow>,
) -> NanoslidesResult<()> {
    let deck = plan.planned.plan();
    let reference_files: Vec<String> = plan
        .reference_files
        .iter()
        .map(|path| path.display().to_string())
        .collect();

    for (position, planned) in deck.slides.iter().enumerate() {
        let index = position + 1;
        debug!(index, title = %planned.title, "Generating planned slide");

        let request =
            GenerateSlideRequest::new(planned.prompt.clone(), plan.style.clone(), aspect_ratio);
        let result = engine.generate(&request).await?;
        let mut path = images
            .persist(&result, &format!("slide-{:02}", index))
            .await?;

        let mut slide_id = None;
        if let Some(presentation) = presentation.as_deref_mut() {
            let (_, _, mut metadata) = result.into_parts();
            metadata.deck_title = Some(deck.deck_title.clone());
            metadata.deck_slide_index = Some(index as u32);
            metadata.deck_slide_title = Some(planned.title.clone());
            metadata.reference_files = reference_files.clone();

            let entry = presentation.add_slide(
                NewSlide::new(planned.prompt.clone())
                    .with_metadata(metadata)
                    .with_image_path(path.clone()),
            )?;
            path = images.rename_for_slide(&path, *entry.order(), entry.id()).await?;
            presentation.set_image_path(entry.id(), Some(path.clone()))?;
            slide_id = Some(entry.id().clone());
        }

        rows.push(DeckRow {
            index,
            title: planned.title.clone(),
            slide_id,
            path,
            generate_command: generate_command(&planned.prompt, &plan.style, aspect_ratio),
        });
    }
    Ok(())
}

/// Equivalent single-slide command line for a planned slide.
fn generate_command(prompt: &str, style: &ResolvedStyle, aspect_ratio: AspectRatio) -> String {
    let mut command = format!(
        "nanoslides generate \"{}\" --aspect-ratio {}",
        prompt.replace('"', "\\\""),
        aspect_ratio
    );
    if let Some(style_id) = &style.style_id {
        command.push_str(&format!(" --style-id {}", style_id));
    }
    command
}
