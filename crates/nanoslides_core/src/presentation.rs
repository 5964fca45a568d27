//! In-memory presentation state and its mutation operations.

use crate::{DEFAULT_MAX_WORDS, SlideEntry, SlideMetadata, dedupe_slide_id, suggest_slide_id};
use chrono::{DateTime, Utc};
use nanoslides_error::{NanoslidesResult, SlideError, SlideErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Parameters for [`Presentation::add_slide`].
///
/// # Examples
///
/// ```
/// use nanoslides_core::NewSlide;
///
/// let slide = NewSlide::new("Quarterly revenue chart").with_id("revenue");
/// assert_eq!(slide.id.as_deref(), Some("revenue"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSlide {
    /// Prompt describing the slide
    pub prompt: String,
    /// Image produced for the slide
    pub image_path: Option<PathBuf>,
    /// Auxiliary facts
    pub metadata: SlideMetadata,
    /// Requested id; derived from the prompt when unset
    pub id: Option<String>,
    /// Requested order; appended after the last main slide when unset
    pub order: Option<u32>,
    /// Whether the slide is a draft
    pub is_draft: bool,
    /// Slide the draft would replace
    pub draft_of: Option<String>,
}

impl NewSlide {
    /// Start a new slide from its prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Set the image path.
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: SlideMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Request a specific id (still deduplicated).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Request a specific order.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }
}

/// The authoritative in-memory deck.
///
/// Main slides always carry the orders `1..=N`. Drafts keep the order of
/// their source and are excluded from that sequence.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use nanoslides_core::{NewSlide, Presentation};
///
/// let mut deck = Presentation::new("Pitch", Utc::now(), "nanobanana");
/// let intro = deck.add_slide(NewSlide::new("Company vision overview")).unwrap();
/// let team = deck.add_slide(NewSlide::new("Meet the team")).unwrap();
///
/// assert_eq!(deck.move_slide(team.id(), 1).unwrap(), (2, 1));
/// let ids: Vec<&str> = deck.ordered_main().iter().map(|s| s.id().as_str()).collect();
/// assert_eq!(ids, vec![team.id().as_str(), intro.id().as_str()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Presentation {
    /// Deck name
    name: String,
    /// When the project was initialized
    created_at: DateTime<Utc>,
    /// Generation engine identifier
    engine: String,
    /// Every entry, main slides and drafts
    slides: Vec<SlideEntry>,
}

impl Presentation {
    /// Create an empty presentation.
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>, engine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at,
            engine: engine.into(),
            slides: Vec::new(),
        }
    }

    /// Assemble a presentation from loaded entries.
    ///
    /// Main slides are renumbered densely by `(order, id)` so a hand-edited
    /// file with gaps or repeated orders comes back consistent. Drafts take
    /// the renumbered order of their source.
    pub fn from_parts(
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        engine: impl Into<String>,
        slides: Vec<SlideEntry>,
    ) -> Self {
        let mut presentation = Self {
            name: name.into(),
            created_at,
            engine: engine.into(),
            slides,
        };
        let ordered = presentation.take_ordered_main();
        presentation.replace_main(ordered);

        let orders: HashMap<String, u32> = presentation
            .slides
            .iter()
            .filter(|slide| slide.is_main())
            .map(|slide| (slide.id.clone(), slide.order))
            .collect();
        for draft in presentation.slides.iter_mut().filter(|slide| slide.is_draft) {
            if let Some(order) = draft.draft_of.as_ref().and_then(|source| orders.get(source)) {
                draft.order = *order;
            }
        }
        presentation
    }

    /// Every entry sorted by `(order, id)`.
    pub fn ordered_all(&self) -> Vec<&SlideEntry> {
        let mut all: Vec<&SlideEntry> = self.slides.iter().collect();
        all.sort_by(|a, b| (a.order, &a.id).cmp(&(b.order, &b.id)));
        all
    }

    /// Main slides sorted by `(order, id)`.
    pub fn ordered_main(&self) -> Vec<&SlideEntry> {
        self.ordered_all()
            .into_iter()
            .filter(|slide| slide.is_main())
            .collect()
    }

    /// Look up an entry by id.
    pub fn find_slide(&self, slide_id: &str) -> Option<&SlideEntry> {
        self.slides.iter().find(|slide| slide.id == slide_id)
    }

    /// Number of main slides.
    pub fn main_count(&self) -> usize {
        self.slides.iter().filter(|slide| slide.is_main()).count()
    }

    /// Drafts pointing at `slide_id`, sorted by id.
    pub fn drafts_of(&self, slide_id: &str) -> Vec<&SlideEntry> {
        let mut drafts: Vec<&SlideEntry> = self
            .slides
            .iter()
            .filter(|slide| slide.draft_of.as_deref() == Some(slide_id))
            .collect();
        drafts.sort_by(|a, b| a.id.cmp(&b.id));
        drafts
    }

    /// True when the presentation has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Add a slide and return a copy of the stored entry.
    ///
    /// The id is suggested from the prompt unless given, and deduplicated
    /// against every id in the presentation. A main slide without an order is
    /// appended; with an order it is inserted at that position (clamped to
    /// the end) and the main slides are renumbered.
    ///
    /// # Errors
    ///
    /// Returns a builder error if `is_draft` and `draft_of` disagree. Checking
    /// that `draft_of` resolves is left to [`create_draft`](Self::create_draft).
    #[tracing::instrument(skip(self, slide), fields(requested_id = ?slide.id))]
    pub fn add_slide(&mut self, slide: NewSlide) -> NanoslidesResult<SlideEntry> {
        let base_id = match slide.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => suggest_slide_id(&slide.prompt, DEFAULT_MAX_WORDS),
        };
        let id = dedupe_slide_id(&base_id, self.slides.iter().map(|s| s.id.as_str()));

        let next_main = self.main_count() as u32 + 1;
        let order = match slide.order {
            Some(order) if order > 0 => order,
            _ => next_main,
        };

        let mut builder = SlideEntry::builder();
        builder
            .id(id)
            .order(order)
            .prompt(slide.prompt)
            .metadata(slide.metadata)
            .is_draft(slide.is_draft);
        if let Some(path) = slide.image_path {
            builder.image_path(path);
        }
        if let Some(source) = slide.draft_of {
            builder.draft_of(source);
        }
        let entry = builder.build()?;

        if entry.is_main() && entry.order < next_main {
            let mut ordered = self.take_ordered_main();
            let index = (entry.order as usize - 1).min(ordered.len());
            ordered.insert(index, entry.clone());
            self.replace_main(ordered);
        } else if entry.is_main() {
            let mut ordered = self.take_ordered_main();
            ordered.push(entry.clone());
            self.replace_main(ordered);
        } else {
            self.slides.push(entry.clone());
        }

        let stored = self
            .find_slide(&entry.id)
            .cloned()
            .unwrap_or(entry);
        tracing::debug!(id = %stored.id, order = stored.order, draft = stored.is_draft, "Added slide");
        Ok(stored)
    }

    /// Remove an entry, returning it, or `None` when the id is unknown.
    ///
    /// Removing a main slide renumbers the remaining main slides and also
    /// drops every draft that pointed at it.
    #[tracing::instrument(skip(self))]
    pub fn remove_slide(&mut self, slide_id: &str) -> Option<SlideEntry> {
        let index = self.slides.iter().position(|slide| slide.id == slide_id)?;
        let removed = self.slides.remove(index);

        if removed.is_main() {
            let before = self.slides.len();
            self.slides
                .retain(|slide| slide.draft_of.as_deref() != Some(slide_id));
            let orphaned = before - self.slides.len();
            if orphaned > 0 {
                tracing::debug!(orphaned, "Removed drafts of deleted slide");
            }
            let ordered = self.take_ordered_main();
            self.replace_main(ordered);
        }

        Some(removed)
    }

    /// Move a main slide to a 1-based position, returning `(old, new)`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `slide_id` is not a main slide
    /// - `InvalidArgument` if `new_position` is outside `1..=main_count()`
    #[tracing::instrument(skip(self))]
    pub fn move_slide(&mut self, slide_id: &str, new_position: usize) -> NanoslidesResult<(usize, usize)> {
        let mut ordered = self.take_ordered_main();
        let Some(index) = ordered.iter().position(|slide| slide.id == slide_id) else {
            self.replace_main(ordered);
            return Err(SlideError::new(SlideErrorKind::NotFound(slide_id.to_string())).into());
        };

        if new_position == 0 || new_position > ordered.len() {
            let count = ordered.len();
            self.replace_main(ordered);
            return Err(SlideError::new(SlideErrorKind::InvalidArgument(format!(
                "position {new_position} is outside the valid range 1..={count}"
            )))
            .into());
        }

        let moving = ordered.remove(index);
        ordered.insert(new_position - 1, moving);
        self.replace_main(ordered);
        Ok((index + 1, new_position))
    }

    /// Create a draft variant of a main slide.
    ///
    /// The draft id is `{source}-draft`, deduplicated, and the draft takes
    /// the source's current order.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the source does not exist
    /// - `InvalidArgument` if the source is itself a draft
    #[tracing::instrument(skip(self, prompt, image_path, metadata))]
    pub fn create_draft(
        &mut self,
        source_id: &str,
        prompt: impl Into<String>,
        image_path: Option<PathBuf>,
        metadata: SlideMetadata,
    ) -> NanoslidesResult<SlideEntry> {
        let source = self
            .find_slide(source_id)
            .ok_or_else(|| SlideError::new(SlideErrorKind::NotFound(source_id.to_string())))?;
        if source.is_draft() {
            return Err(SlideError::new(SlideErrorKind::InvalidArgument(format!(
                "'{source_id}' is a draft; drafts are created from main slides"
            )))
            .into());
        }

        let slide = NewSlide {
            prompt: prompt.into(),
            image_path,
            metadata,
            id: Some(format!("{}-draft", source.id)),
            order: Some(source.order),
            is_draft: true,
            draft_of: Some(source.id.clone()),
        };
        self.add_slide(slide)
    }

    /// Apply a draft onto its source and remove the draft.
    ///
    /// Prompt, image path, and metadata (minus the review marker) are copied
    /// onto the source. The source keeps its id and order. Returns the
    /// updated source and the removed draft.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `draft_id` does not exist
    /// - `IntegrityViolation` if it is not a draft or its source is missing
    #[tracing::instrument(skip(self))]
    pub fn apply_draft(&mut self, draft_id: &str) -> NanoslidesResult<(SlideEntry, SlideEntry)> {
        let (draft_index, source_index) = self.locate_draft(draft_id)?;
        let draft = self.slides[draft_index].clone();

        let source = &mut self.slides[source_index];
        source.prompt = draft.prompt.clone();
        source.image_path = draft.image_path.clone();
        source.metadata = draft.metadata.without_review_status();
        source.is_draft = false;
        source.draft_of = None;
        let updated = source.clone();

        self.slides.remove(draft_index);
        tracing::debug!(source = %updated.id, "Applied draft");
        Ok((updated, draft))
    }

    /// Remove a draft without touching its source.
    ///
    /// # Errors
    ///
    /// Same conditions as [`apply_draft`](Self::apply_draft).
    #[tracing::instrument(skip(self))]
    pub fn discard_draft(&mut self, draft_id: &str) -> NanoslidesResult<SlideEntry> {
        let (draft_index, _) = self.locate_draft(draft_id)?;
        Ok(self.slides.remove(draft_index))
    }

    /// Replace prompt, image, and metadata of an entry in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id does not exist.
    pub fn update_slide(
        &mut self,
        slide_id: &str,
        prompt: impl Into<String>,
        image_path: Option<PathBuf>,
        metadata: SlideMetadata,
    ) -> NanoslidesResult<SlideEntry> {
        let slide = self.find_slide_mut(slide_id)?;
        slide.prompt = prompt.into();
        slide.image_path = image_path;
        slide.metadata = metadata;
        Ok(slide.clone())
    }

    /// Point an entry at a new image file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id does not exist.
    pub fn set_image_path(&mut self, slide_id: &str, path: Option<PathBuf>) -> NanoslidesResult<()> {
        self.find_slide_mut(slide_id)?.image_path = path;
        Ok(())
    }

    /// Remove every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.slides.len();
        self.slides.clear();
        count
    }

    fn find_slide_mut(&mut self, slide_id: &str) -> NanoslidesResult<&mut SlideEntry> {
        self.slides
            .iter_mut()
            .find(|slide| slide.id == slide_id)
            .ok_or_else(|| SlideError::new(SlideErrorKind::NotFound(slide_id.to_string())).into())
    }

    fn locate_draft(&self, draft_id: &str) -> NanoslidesResult<(usize, usize)> {
        let draft_index = self
            .slides
            .iter()
            .position(|slide| slide.id == draft_id)
            .ok_or_else(|| SlideError::new(SlideErrorKind::NotFound(draft_id.to_string())))?;
        let draft = &self.slides[draft_index];

        if !draft.is_draft {
            return Err(SlideError::new(SlideErrorKind::IntegrityViolation(format!(
                "'{draft_id}' is not a draft"
            )))
            .into());
        }
        let Some(source_id) = draft.draft_of.as_deref() else {
            return Err(SlideError::new(SlideErrorKind::IntegrityViolation(format!(
                "draft '{draft_id}' has no source slide"
            )))
            .into());
        };
        let source_index = self
            .slides
            .iter()
            .position(|slide| slide.id == source_id && slide.is_main())
            .ok_or_else(|| {
                SlideError::new(SlideErrorKind::IntegrityViolation(format!(
                    "source slide '{source_id}' of draft '{draft_id}' does not exist"
                )))
            })?;

        Ok((draft_index, source_index))
    }

    /// Detach the main slides in `(order, id)` order, leaving only drafts.
    fn take_ordered_main(&mut self) -> Vec<SlideEntry> {
        let (mut main, drafts): (Vec<SlideEntry>, Vec<SlideEntry>) =
            std::mem::take(&mut self.slides)
                .into_iter()
                .partition(SlideEntry::is_main);
        main.sort_by(|a, b| (a.order, &a.id).cmp(&(b.order, &b.id)));
        self.slides = drafts;
        main
    }

    /// Renumber `ordered` as `1..=N` and put it in front of the drafts.
    fn replace_main(&mut self, mut ordered: Vec<SlideEntry>) {
        for (index, slide) in ordered.iter_mut().enumerate() {
            slide.order = index as u32 + 1;
        }
        ordered.append(&mut self.slides);
        self.slides = ordered;
    }
}
