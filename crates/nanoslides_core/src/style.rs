//! Style definitions and the layered style resolver.
//!
//! An effective style is merged from up to four sources, lowest precedence
//! first:
//!
//! 1. an entry of the global registry, picked by the requested id or the
//!    project's own `style_id` (`"default"` and blank ids select nothing)
//! 2. the project style
//! 3. ad-hoc reference images given at the call site
//! 4. a style inferred by the planner, only when 1-3 produced nothing
//!
//! Text fields are joined with a blank line. Lists are concatenated in
//! precedence order and deduplicated keeping the first occurrence. Relative
//! image paths are resolved against the directory of the file that declared
//! them. Resolution never touches the filesystem.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

/// Reusable style payload shared by the registry and the project style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Text prepended to every prompt
    #[serde(default)]
    pub base_prompt: String,
    /// Things the model should avoid
    #[serde(default)]
    pub negative_prompt: String,
    /// Style reference image paths, possibly relative to the declaring file
    #[serde(default)]
    pub reference_images: Vec<String>,
    /// Free-text notes about the references
    #[serde(default)]
    pub reference_comments: Vec<String>,
}

impl StyleDefinition {
    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.base_prompt.trim().is_empty()
            && self.negative_prompt.trim().is_empty()
            && self.reference_images.is_empty()
            && self.reference_comments.is_empty()
    }
}

/// Project-level style, optionally pointing at a global registry entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStyle {
    /// Project overrides
    #[serde(flatten)]
    pub definition: StyleDefinition,
    /// Global registry entry to layer underneath
    #[serde(default)]
    pub style_id: Option<String>,
}

/// Named global styles.
///
/// # Examples
///
/// ```
/// use nanoslides_core::{StyleDefinition, StyleRegistry};
///
/// let mut registry = StyleRegistry::default();
/// registry.insert("noir", StyleDefinition {
///     base_prompt: "High-contrast black and white".to_string(),
///     ..Default::default()
/// });
/// assert!(registry.get("noir").is_some());
/// assert_eq!(registry.names().collect::<Vec<_>>(), vec!["noir"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRegistry {
    /// Styles by id
    #[serde(default)]
    pub styles: BTreeMap<String, StyleDefinition>,
}

impl StyleRegistry {
    /// Look up a style by id.
    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    /// Insert or replace a style, returning the previous definition.
    pub fn insert(&mut self, id: impl Into<String>, definition: StyleDefinition) -> Option<StyleDefinition> {
        self.styles.insert(id.into(), definition)
    }

    /// Remove a style.
    pub fn remove(&mut self, id: &str) -> Option<StyleDefinition> {
        self.styles.remove(id)
    }

    /// Style ids in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// True when no style is registered.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Effective style for a single generation or edit call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    /// Selected global style id
    pub style_id: Option<String>,
    /// Merged base prompt
    pub base_prompt: String,
    /// Merged negative prompt
    pub negative_prompt: String,
    /// Normalized reference image paths
    pub reference_images: Vec<PathBuf>,
    /// Reference comments
    pub reference_comments: Vec<String>,
}

impl ResolvedStyle {
    /// True when any style source contributed something.
    pub fn has_context(&self) -> bool {
        self.style_id.is_some()
            || !self.base_prompt.trim().is_empty()
            || !self.negative_prompt.trim().is_empty()
            || !self.reference_images.is_empty()
            || !self.reference_comments.is_empty()
    }

    /// Apply a planner-inferred style.
    ///
    /// Replaces both prompts, and only when the style has no context of its
    /// own and the inferred style is not blank.
    pub fn with_inferred(mut self, base_prompt: &str, negative_prompt: &str) -> Self {
        let base = base_prompt.trim();
        let negative = negative_prompt.trim();
        if self.has_context() || (base.is_empty() && negative.is_empty()) {
            return self;
        }
        self.base_prompt = base.to_string();
        self.negative_prompt = negative.to_string();
        self
    }

    /// Append ad-hoc reference images, resolving relative paths against
    /// `working_dir`.
    pub fn with_references(mut self, references: &[PathBuf], working_dir: Option<&Path>) -> Self {
        if references.is_empty() {
            return self;
        }
        let mut combined = std::mem::take(&mut self.reference_images);
        combined.extend(
            references
                .iter()
                .filter_map(|path| normalize_reference_path(&path.to_string_lossy(), working_dir)),
        );
        self.reference_images = unique_paths(combined);
        self
    }
}

/// Trim a style id, mapping blank ids and `"default"` to `None`.
///
/// # Examples
///
/// ```
/// use nanoslides_core::normalize_style_id;
///
/// assert_eq!(normalize_style_id(Some(" noir ")), Some("noir".to_string()));
/// assert_eq!(normalize_style_id(Some("default")), None);
/// assert_eq!(normalize_style_id(Some("  ")), None);
/// ```
pub fn normalize_style_id(style_id: Option<&str>) -> Option<String> {
    let cleaned = style_id?.trim();
    if cleaned.is_empty() || cleaned == "default" {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Layered style resolver.
///
/// Each scope is optional and borrowed; `base_dir` is the directory of the
/// file the scope was loaded from. A scope without a directory keeps relative
/// paths as written.
///
/// # Examples
///
/// ```
/// use nanoslides_core::{ProjectStyle, StyleDefinition, StyleRegistry, StyleResolver};
///
/// let mut registry = StyleRegistry::default();
/// registry.insert("noir", StyleDefinition {
///     base_prompt: "X".to_string(),
///     ..Default::default()
/// });
/// let project = ProjectStyle {
///     definition: StyleDefinition { base_prompt: "Y".to_string(), ..Default::default() },
///     style_id: Some("noir".to_string()),
/// };
///
/// let resolved = StyleResolver::new()
///     .with_registry(&registry, None)
///     .with_project(&project, None)
///     .resolve(None);
/// assert_eq!(resolved.base_prompt, "X\n\nY");
/// assert_eq!(resolved.style_id.as_deref(), Some("noir"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleResolver<'a> {
    registry: Option<(&'a StyleRegistry, Option<&'a Path>)>,
    project: Option<(&'a ProjectStyle, Option<&'a Path>)>,
    references: Vec<PathBuf>,
    working_dir: Option<&'a Path>,
}

impl<'a> StyleResolver<'a> {
    /// Resolver with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a global registry declared in `base_dir`.
    pub fn with_registry(mut self, registry: &'a StyleRegistry, base_dir: Option<&'a Path>) -> Self {
        self.registry = Some((registry, base_dir));
        self
    }

    /// Use a project style declared in `base_dir`.
    pub fn with_project(mut self, project: &'a ProjectStyle, base_dir: Option<&'a Path>) -> Self {
        self.project = Some((project, base_dir));
        self
    }

    /// Add ad-hoc reference images given relative to `working_dir`.
    pub fn with_references(mut self, references: &[PathBuf], working_dir: Option<&'a Path>) -> Self {
        self.references.extend(references.iter().cloned());
        self.working_dir = working_dir;
        self
    }

    /// Merge every configured source into one style.
    ///
    /// `requested_id` takes priority over the project's `style_id`. An id
    /// that names no registry entry is kept but contributes no fields.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self, requested_id: Option<&str>) -> ResolvedStyle {
        let project = self.project;
        let style_id = normalize_style_id(requested_id).or_else(|| {
            project.and_then(|(style, _)| normalize_style_id(style.style_id.as_deref()))
        });

        let empty = StyleDefinition::default();
        let (global, global_dir) = match (&style_id, self.registry) {
            (Some(id), Some((registry, dir))) => match registry.get(id) {
                Some(definition) => (definition, dir),
                None => {
                    tracing::debug!(style_id = %id, "Style id not found in global registry");
                    (&empty, None)
                }
            },
            _ => (&empty, None),
        };
        let (local, local_dir) = project
            .map(|(style, dir)| (&style.definition, dir))
            .unwrap_or((&empty, None));

        let mut reference_images: Vec<PathBuf> = global
            .reference_images
            .iter()
            .filter_map(|raw| normalize_reference_path(raw, global_dir))
            .collect();
        reference_images.extend(
            local
                .reference_images
                .iter()
                .filter_map(|raw| normalize_reference_path(raw, local_dir)),
        );

        let resolved = ResolvedStyle {
            style_id,
            base_prompt: join_non_empty(&global.base_prompt, &local.base_prompt),
            negative_prompt: join_non_empty(&global.negative_prompt, &local.negative_prompt),
            reference_images: unique_paths(reference_images),
            reference_comments: unique_strings(
                global
                    .reference_comments
                    .iter()
                    .chain(local.reference_comments.iter()),
            ),
        };

        resolved.with_references(&self.references, self.working_dir)
    }
}

/// Resolve a declared reference path lexically.
///
/// Blank input yields `None`. `~` expands to the home directory, relative
/// paths are joined onto `base_dir` when one is given, and `.`/`..`
/// components are folded without consulting the filesystem.
pub fn normalize_reference_path(raw: &str, base_dir: Option<&Path>) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let expanded = expand_home(trimmed);
    let joined = match base_dir {
        Some(dir) if expanded.is_relative() => dir.join(expanded),
        _ => expanded,
    };
    Some(clean_path(&joined))
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

fn join_non_empty(first: &str, second: &str) -> String {
    [first.trim(), second.trim()]
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn unique_strings<'s>(values: impl Iterator<Item = &'s String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .map(|value| value.trim())
        .filter(|value| !value.is_empty() && seen.insert(value.to_string()))
        .map(str::to_string)
        .collect()
}

fn unique_paths(values: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
