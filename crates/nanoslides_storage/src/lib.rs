//! Persistence for nanoslides.
//!
//! Everything that reads or writes files lives here:
//!
//! - **Project state**: `slides.yaml`, versioned, with migration of the legacy flat shape
//! - **Styles**: the project `style.json` and the global `~/.nanoslides/styles.json`
//! - **Configuration**: `~/.nanoslides/config.toml`
//! - **Images**: generated slide images and their `{order}_{id}` names
//! - **Reference files**: text files injected into prompts
//!
//! Locations are carried by an explicit [`NanoslidesPaths`] value rather than
//! globals, so tests can point every store at a temporary directory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod fs;
mod image;
mod paths;
mod project;
mod reference;
mod style;

pub use config::{DEFAULT_ENGINE, DEFAULT_OUTPUT_DIR, GEMINI_PROVIDER, NanoslidesConfig};
pub use image::ImageStore;
pub use nanoslides_error::{StorageError, StorageErrorKind};
pub use paths::NanoslidesPaths;
pub use project::{CURRENT_SCHEMA_VERSION, ProjectStore};
pub use reference::{
    MAX_REFERENCE_FILE_CHARS, ReferenceFile, inject_reference_context, read_reference_files,
    reference_context, resolve_reference_files,
};
pub use style::StyleStore;
