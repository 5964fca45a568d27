//! Per-invocation context: file locations plus user configuration.

use nanoslides_core::{Presentation, ResolvedStyle, StyleResolver};
use nanoslides_error::{GeminiError, GeminiErrorKind, NanoslidesResult};
use nanoslides_models::GeminiClient;
use nanoslides_storage::{
    ImageStore, NanoslidesConfig, NanoslidesPaths, ProjectStore, StyleStore,
};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Everything a command needs to find its files.
///
/// Commands receive a `Workspace` instead of reaching for process-wide
/// state, so tests can point one at a temporary directory.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct Workspace {
    /// File locations
    paths: NanoslidesPaths,
    /// User configuration
    config: NanoslidesConfig,
}

impl Workspace {
    /// Workspace from explicit parts.
    pub fn new(paths: NanoslidesPaths, config: NanoslidesConfig) -> Self {
        Self { paths, config }
    }

    /// Workspace whose configuration is read from `paths.config_file()`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file exists but is invalid.
    #[instrument(skip_all, fields(project = %paths.project_dir().display()))]
    pub fn load(paths: NanoslidesPaths) -> NanoslidesResult<Self> {
        let config = NanoslidesConfig::load(paths.config_file())?;
        Ok(Self { paths, config })
    }

    /// Store for `slides.yaml`.
    pub fn project_store(&self) -> ProjectStore {
        ProjectStore::new(self.paths.state_file())
    }

    /// Store for the project style and the global registry.
    pub fn style_store(&self) -> StyleStore {
        StyleStore::new(self.paths.style_file(), self.paths.styles_file())
    }

    /// Image store for `output_dir`, or the configured default directory.
    ///
    /// Relative directories are taken relative to the project.
    pub fn image_store(&self, output_dir: Option<&Path>) -> ImageStore {
        let dir = output_dir.unwrap_or(&self.config.default_output_dir);
        ImageStore::new(self.paths.in_project(dir))
    }

    /// Load the project, `None` when it has not been initialized.
    ///
    /// # Errors
    ///
    /// Returns a storage error if `slides.yaml` exists but cannot be loaded.
    pub fn load_project_if_present(&self) -> NanoslidesResult<Option<Presentation>> {
        let store = self.project_store();
        if !store.exists() {
            debug!(path = %store.path().display(), "No project state, slides will not be recorded");
            return Ok(None);
        }
        Ok(Some(store.load()?))
    }

    /// Resolve the effective style for one call.
    ///
    /// `references` are ad-hoc style images given on the command line,
    /// relative to the project directory.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a style file exists but cannot be parsed.
    #[instrument(skip(self, references), fields(references = references.len()))]
    pub fn resolve_style(
        &self,
        style_id: Option<&str>,
        references: &[PathBuf],
    ) -> NanoslidesResult<ResolvedStyle> {
        let store = self.style_store();
        let registry = store.load_registry()?;
        let project = store.load_project()?;

        let mut resolver = StyleResolver::new().with_registry(&registry, store.global_dir());
        if let Some(project) = &project {
            resolver = resolver.with_project(project, store.project_dir());
        }
        let resolved = resolver
            .with_references(references, Some(self.paths.project_dir().as_path()))
            .resolve(style_id);

        debug!(
            style_id = ?resolved.style_id,
            reference_images = resolved.reference_images.len(),
            "Resolved style"
        );
        Ok(resolved)
    }

    /// Gemini client authenticated with the configured key.
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` when no key is configured.
    pub fn gemini_client(&self) -> NanoslidesResult<GeminiClient> {
        let api_key = self
            .config
            .gemini_api_key(None)
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Ok(GeminiClient::new(api_key)?)
    }
}
