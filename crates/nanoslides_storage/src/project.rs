//! Project state file with versioned loading.
//!
//! The current shape carries `schema_version: 2` and full slide entries. The
//! legacy shape has no version and slides that may lack `id`, `order`,
//! `is_draft` and `draft_of`. Legacy files are migrated on load and are
//! always written back in the current shape.

use crate::fs::{read_text, write_atomic};
use chrono::{DateTime, Utc};
use nanoslides_core::{
    DEFAULT_MAX_WORDS, Presentation, SlideEntry, SlideMetadata, dedupe_slide_id, suggest_slide_id,
};
use nanoslides_error::{NanoslidesResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Schema version written by [`ProjectStore::save`].
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    schema_version: u32,
    name: String,
    created_at: DateTime<Utc>,
    engine: String,
    #[serde(default)]
    slides: Vec<SlideEntry>,
}

#[derive(Debug, Deserialize)]
struct LegacyProjectFile {
    name: String,
    created_at: DateTime<Utc>,
    engine: String,
    #[serde(default)]
    slides: Vec<LegacySlide>,
}

#[derive(Debug, Deserialize)]
struct LegacySlide {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    image_path: Option<PathBuf>,
    #[serde(default)]
    metadata: SlideMetadata,
    #[serde(default)]
    is_draft: bool,
    #[serde(default)]
    draft_of: Option<String>,
}

/// Loads and saves the project state file.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Store backed by `path` (normally `./slides.yaml`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a state file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the presentation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file does not exist
    /// - `Parse` if it matches neither the current nor the legacy shape
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> NanoslidesResult<Presentation> {
        let raw = read_text(&self.path)?;
        let presentation = parse_project(&raw, &self.path)?;
        tracing::debug!(slides = presentation.slides().len(), "Loaded project state");
        Ok(presentation)
    }

    /// Save the presentation in the current schema.
    ///
    /// # Errors
    ///
    /// Returns a storage error if serialization or the write fails.
    #[tracing::instrument(skip(self, presentation), fields(path = %self.path.display()))]
    pub fn save(&self, presentation: &Presentation) -> NanoslidesResult<()> {
        let file = ProjectFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            name: presentation.name().clone(),
            created_at: *presentation.created_at(),
            engine: presentation.engine().clone(),
            slides: presentation
                .ordered_all()
                .into_iter()
                .cloned()
                .collect(),
        };
        let yaml = serde_yaml::to_string(&file).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "serialize {}: {}",
                self.path.display(),
                e
            )))
        })?;
        write_atomic(&self.path, yaml.as_bytes())?;

        tracing::info!(slides = file.slides.len(), "Saved project state");
        Ok(())
    }
}

fn parse_error(path: &Path, detail: impl std::fmt::Display) -> StorageError {
    StorageError::new(StorageErrorKind::Parse(format!("{}: {}", path.display(), detail)))
}

fn parse_project(raw: &str, path: &Path) -> Result<Presentation, StorageError> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(raw).map_err(|e| parse_error(path, e))?;

    let version = match &value {
        serde_yaml::Value::Mapping(map) => map.get("schema_version").cloned(),
        serde_yaml::Value::Null => None,
        _ => return Err(parse_error(path, "expected a mapping at the top level")),
    };

    match version {
        Some(version) => {
            let version: u32 = serde_yaml::from_value(version)
                .map_err(|e| parse_error(path, format!("schema_version: {e}")))?;
            if version != CURRENT_SCHEMA_VERSION {
                return Err(parse_error(
                    path,
                    format!("unsupported schema_version {version}"),
                ));
            }
            let file: ProjectFile =
                serde_yaml::from_value(value).map_err(|e| parse_error(path, e))?;
            let slides = check_current(file.slides).map_err(|e| parse_error(path, e))?;
            Ok(Presentation::from_parts(
                file.name,
                file.created_at,
                file.engine,
                slides,
            ))
        }
        None => {
            let legacy: LegacyProjectFile =
                serde_yaml::from_value(value).map_err(|e| parse_error(path, e))?;
            tracing::info!(path = %path.display(), "Migrating legacy project state");
            migrate_legacy(legacy).map_err(|e| parse_error(path, e))
        }
    }
}

/// Validate entries read in the current shape.
///
/// Repeated ids and inconsistent draft fields are rejected. Drafts whose
/// source is not a main slide are dropped.
fn check_current(slides: Vec<SlideEntry>) -> Result<Vec<SlideEntry>, String> {
    let mut seen = HashSet::new();
    for slide in &slides {
        if !seen.insert(slide.id().as_str()) {
            return Err(format!("slide id '{}' appears more than once", slide.id()));
        }
        if slide.is_draft() != slide.draft_of().is_some() {
            return Err(format!("slide '{}' has inconsistent draft fields", slide.id()));
        }
    }

    let main_ids: HashSet<String> = slides
        .iter()
        .filter(|slide| slide.is_main())
        .map(|slide| slide.id().clone())
        .collect();
    Ok(slides
        .into_iter()
        .filter(|slide| match slide.draft_of() {
            Some(source) if !main_ids.contains(source) => {
                tracing::warn!(id = %slide.id(), source = %source, "Dropping draft whose source slide is missing");
                false
            }
            _ => true,
        })
        .collect())
}

/// Give every legacy slide an id and an order.
///
/// Ids come from the file or are suggested from the prompt, and are
/// deduplicated against the ids seen so far in file order. `draft_of` links
/// follow their source through that renaming; a draft whose source cannot be
/// found becomes a main slide. Main slides without an order take their
/// position among main slides, and drafts take their source's order.
fn migrate_legacy(legacy: LegacyProjectFile) -> Result<Presentation, String> {
    let slides = legacy.slides;

    let mut seen: HashSet<String> = HashSet::new();
    let mut renamed: HashMap<String, String> = HashMap::new();
    let mut ids = Vec::with_capacity(slides.len());
    for slide in &slides {
        let original = slide.id.as_deref().map(str::trim).filter(|id| !id.is_empty());
        let base_id = match original {
            Some(id) => id.to_string(),
            None => suggest_slide_id(&slide.prompt, DEFAULT_MAX_WORDS),
        };
        let id = dedupe_slide_id(&base_id, &seen);
        seen.insert(id.clone());
        if let Some(original) = original {
            renamed
                .entry(original.to_string())
                .or_insert_with(|| id.clone());
        }
        ids.push(id);
    }

    let claims_source = |slide: &LegacySlide| slide.is_draft && slide.draft_of.is_some();
    let main_ids: HashSet<&str> = slides
        .iter()
        .zip(&ids)
        .filter(|(slide, _)| !claims_source(slide))
        .map(|(_, id)| id.as_str())
        .collect();

    let sources: Vec<Option<String>> = slides
        .iter()
        .zip(&ids)
        .map(|(slide, id)| {
            if !slide.is_draft {
                return None;
            }
            let source = slide
                .draft_of
                .as_deref()
                .map(str::trim)
                .and_then(|raw| renamed.get(raw).map(String::as_str).or(Some(raw)))
                .filter(|source| main_ids.contains(source));
            if source.is_none() {
                tracing::warn!(id = %id, draft_of = ?slide.draft_of, "Legacy draft has no source; keeping it as a main slide");
            }
            source.map(str::to_string)
        })
        .collect();

    let mut orders = vec![0u32; slides.len()];
    let mut main_orders: HashMap<&str, u32> = HashMap::new();
    let mut main_position = 0u32;
    for (index, slide) in slides.iter().enumerate() {
        if sources[index].is_some() {
            continue;
        }
        main_position += 1;
        let order = slide.order.filter(|order| *order > 0).unwrap_or(main_position);
        orders[index] = order;
        main_orders.insert(ids[index].as_str(), order);
    }
    for (index, source) in sources.iter().enumerate() {
        if let Some(source) = source {
            orders[index] = main_orders.get(source.as_str()).copied().unwrap_or(1);
        }
    }

    let mut entries = Vec::with_capacity(slides.len());
    for (((slide, id), order), source) in slides
        .into_iter()
        .zip(ids.iter().cloned())
        .zip(orders)
        .zip(sources)
    {
        let mut builder = SlideEntry::builder();
        builder
            .id(id)
            .order(order)
            .prompt(slide.prompt)
            .metadata(slide.metadata)
            .is_draft(source.is_some());
        if let Some(path) = slide.image_path {
            builder.image_path(path);
        }
        if let Some(source) = source {
            builder.draft_of(source);
        }
        entries.push(builder.build().map_err(|e| e.to_string())?);
    }

    Ok(Presentation::from_parts(
        legacy.name,
        legacy.created_at,
        legacy.engine,
        entries,
    ))
}
