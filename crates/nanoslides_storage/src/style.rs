//! Project and global style files.

use crate::fs::{read_text, write_atomic};
use nanoslides_core::{ProjectStyle, StyleDefinition, StyleRegistry, normalize_style_id};
use nanoslides_error::{
    JsonError, NanoslidesResult, StorageError, StorageErrorKind, StyleError, StyleErrorKind,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Reads and writes `style.json` and the global `styles.json`.
#[derive(Debug, Clone)]
pub struct StyleStore {
    project_path: PathBuf,
    global_path: PathBuf,
}

impl StyleStore {
    /// Store for the given project style and global registry files.
    pub fn new(project_path: impl Into<PathBuf>, global_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            global_path: global_path.into(),
        }
    }

    /// Location of the project style file.
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Location of the global registry.
    pub fn global_path(&self) -> &Path {
        &self.global_path
    }

    /// Directory relative project reference images resolve against.
    pub fn project_dir(&self) -> Option<&Path> {
        self.project_path.parent()
    }

    /// Directory relative global reference images resolve against.
    pub fn global_dir(&self) -> Option<&Path> {
        self.global_path.parent()
    }

    /// Load the project style, `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read or parsed.
    #[tracing::instrument(skip(self), fields(path = %self.project_path.display()))]
    pub fn load_project(&self) -> NanoslidesResult<Option<ProjectStyle>> {
        if !self.project_path.exists() {
            return Ok(None);
        }
        Ok(Some(load_json(&self.project_path)?))
    }

    /// Save the project style.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    #[tracing::instrument(skip(self, style), fields(path = %self.project_path.display()))]
    pub fn save_project(&self, style: &ProjectStyle) -> NanoslidesResult<()> {
        save_json(&self.project_path, style)?;
        tracing::info!("Saved project style");
        Ok(())
    }

    /// Load the global registry, empty when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read or parsed.
    #[tracing::instrument(skip(self), fields(path = %self.global_path.display()))]
    pub fn load_registry(&self) -> NanoslidesResult<StyleRegistry> {
        if !self.global_path.exists() {
            return Ok(StyleRegistry::default());
        }
        load_json(&self.global_path)
    }

    /// Save the global registry.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    #[tracing::instrument(skip(self, registry), fields(path = %self.global_path.display()))]
    pub fn save_registry(&self, registry: &StyleRegistry) -> NanoslidesResult<()> {
        save_json(&self.global_path, registry)?;
        tracing::info!(styles = registry.styles.len(), "Saved global styles");
        Ok(())
    }

    /// Insert or replace a global style and save the registry.
    ///
    /// Returns the normalized id the style was stored under.
    ///
    /// # Errors
    ///
    /// - `MissingStyleId` if `name` is blank
    /// - `InvalidStyleId` if `name` is the reserved `default`
    pub fn set_global(&self, name: &str, definition: StyleDefinition) -> NanoslidesResult<String> {
        let id = validate_style_name(name)?;
        let mut registry = self.load_registry()?;
        registry.insert(id.clone(), definition);
        self.save_registry(&registry)?;
        Ok(id)
    }

    /// Remove a global style and save the registry.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStyle` if no style has that id.
    pub fn remove_global(&self, name: &str) -> NanoslidesResult<StyleDefinition> {
        let id = name.trim();
        let mut registry = self.load_registry()?;
        let removed = registry
            .remove(id)
            .ok_or_else(|| StyleError::new(StyleErrorKind::UnknownStyle(id.to_string())))?;
        self.save_registry(&registry)?;
        Ok(removed)
    }
}

fn validate_style_name(name: &str) -> Result<String, StyleError> {
    if name.trim().is_empty() {
        return Err(StyleError::new(StyleErrorKind::MissingStyleId));
    }
    normalize_style_id(Some(name)).ok_or_else(|| {
        StyleError::new(StyleErrorKind::InvalidStyleId {
            id: name.trim().to_string(),
            reason: "'default' is reserved for \"no global style\"".to_string(),
        })
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> NanoslidesResult<T> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        StorageError::new(StorageErrorKind::Parse(format!("{}: {}", path.display(), e))).into()
    })
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> NanoslidesResult<()> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| JsonError::new(path.display().to_string(), e))?;
    json.push('\n');
    write_atomic(path, json.as_bytes())?;
    Ok(())
}
