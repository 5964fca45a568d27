//! Global user configuration.

use crate::fs::write_atomic;
use config::{Config, File, FileFormat};
use nanoslides_error::{ConfigError, ConfigErrorKind, NanoslidesError, NanoslidesResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Engine used when none is configured.
pub const DEFAULT_ENGINE: &str = "nanobanana";
/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "./slides";
/// Key under `[api_keys]` holding the Gemini key.
pub const GEMINI_PROVIDER: &str = "gemini";

const GEMINI_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// User-level configuration stored in `~/.nanoslides/config.toml`.
///
/// # Examples
///
/// ```
/// use nanoslides_storage::NanoslidesConfig;
///
/// let config = NanoslidesConfig::default();
/// assert_eq!(config.default_engine, "nanobanana");
/// assert_eq!(config.default_output_dir.to_str(), Some("./slides"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanoslidesConfig {
    /// Engine recorded in new projects
    #[serde(default = "default_engine")]
    pub default_engine: String,
    /// Where generated images go when no `--output-dir` is given
    #[serde(default = "default_output_dir")]
    pub default_output_dir: PathBuf,
    /// Provider API keys by provider name
    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for NanoslidesConfig {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            default_output_dir: default_output_dir(),
            api_keys: BTreeMap::new(),
        }
    }
}

impl NanoslidesConfig {
    /// Load configuration, falling back to defaults for anything missing.
    ///
    /// The file itself is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> NanoslidesResult<Self> {
        debug!("Loading configuration");

        Config::builder()
            .set_default("default_engine", DEFAULT_ENGINE)
            .and_then(|builder| builder.set_default("default_output_dir", DEFAULT_OUTPUT_DIR))
            .map_err(|e| {
                NanoslidesError::from(ConfigError::new(ConfigErrorKind::Read(format!(
                    "defaults: {}",
                    e
                ))))
            })?
            .add_source(File::new(&path.as_ref().to_string_lossy(), FileFormat::Toml).required(false))
            .build()
            .map_err(|e| {
                NanoslidesError::from(ConfigError::new(ConfigErrorKind::Read(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| {
                NanoslidesError::from(ConfigError::new(ConfigErrorKind::Read(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })
    }

    /// Write the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> NanoslidesResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Serialize(e.to_string()))
        })?;
        write_atomic(path.as_ref(), contents.as_bytes())?;
        tracing::info!("Saved configuration");
        Ok(())
    }

    /// Store an API key for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider name or key is blank.
    pub fn set_api_key(&mut self, provider: &str, api_key: &str) -> Result<(), ConfigError> {
        let provider = provider.trim().to_lowercase();
        let api_key = api_key.trim();
        if provider.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Blank("Provider name")));
        }
        if api_key.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Blank("API key")));
        }
        self.api_keys.insert(provider, api_key.to_string());
        Ok(())
    }

    /// Resolve the Gemini API key.
    ///
    /// Order: `explicit`, `api_keys.gemini`, `GEMINI_API_KEY`,
    /// `GOOGLE_API_KEY`. Blank values are skipped.
    pub fn gemini_api_key(&self, explicit: Option<&str>) -> Option<String> {
        self.gemini_api_key_with(explicit, |name| std::env::var(name).ok())
    }

    /// [`gemini_api_key`](Self::gemini_api_key) with an injectable
    /// environment lookup.
    pub fn gemini_api_key_with(
        &self,
        explicit: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        let non_blank = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        explicit
            .and_then(non_blank)
            .or_else(|| self.api_keys.get(GEMINI_PROVIDER).and_then(|k| non_blank(k)))
            .or_else(|| {
                GEMINI_ENV_VARS
                    .iter()
                    .find_map(|name| env(name).as_deref().and_then(non_blank))
            })
    }
}
