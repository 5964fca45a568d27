//! File locations used by a nanoslides invocation.

use nanoslides_error::{ConfigError, ConfigErrorKind};
use std::path::{Path, PathBuf};

/// Project state file name.
pub const STATE_FILE_NAME: &str = "slides.yaml";
/// Project style file name.
pub const STYLE_FILE_NAME: &str = "style.json";
/// Global directory name under the home directory.
pub const GLOBAL_DIR_NAME: &str = ".nanoslides";
/// Global style registry file name.
pub const STYLES_FILE_NAME: &str = "styles.json";
/// Global configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Every location a command reads or writes.
///
/// # Examples
///
/// ```
/// use nanoslides_storage::NanoslidesPaths;
/// use std::path::Path;
///
/// let paths = NanoslidesPaths::new("/work/deck", "/home/me/.nanoslides");
/// assert_eq!(paths.state_file(), Path::new("/work/deck/slides.yaml"));
/// assert_eq!(paths.styles_file(), Path::new("/home/me/.nanoslides/styles.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct NanoslidesPaths {
    /// Project directory
    project_dir: PathBuf,
    /// `slides.yaml` inside the project
    state_file: PathBuf,
    /// `style.json` inside the project
    style_file: PathBuf,
    /// Global `~/.nanoslides` directory
    global_dir: PathBuf,
    /// Global style registry
    styles_file: PathBuf,
    /// Global configuration
    config_file: PathBuf,
}

impl NanoslidesPaths {
    /// Paths for a project directory and an explicit global directory.
    pub fn new(project_dir: impl Into<PathBuf>, global_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let global_dir = global_dir.into();
        Self {
            state_file: project_dir.join(STATE_FILE_NAME),
            style_file: project_dir.join(STYLE_FILE_NAME),
            styles_file: global_dir.join(STYLES_FILE_NAME),
            config_file: global_dir.join(CONFIG_FILE_NAME),
            project_dir,
            global_dir,
        }
    }

    /// Paths for a project directory with the global directory under `$HOME`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the home directory cannot be found.
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::HomeDirectory))?;
        Ok(Self::new(project_dir, home.join(GLOBAL_DIR_NAME)))
    }

    /// Same global directory, different project directory.
    pub fn with_project_dir(&self, project_dir: impl Into<PathBuf>) -> Self {
        Self::new(project_dir, self.global_dir.clone())
    }

    /// Resolve `path` against the project directory when it is relative.
    pub fn in_project(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }
}
