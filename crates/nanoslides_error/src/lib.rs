//! Error types for nanoslides.
//!
//! Every concern in the workspace reports failures through the same shape:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! All of them convert into [`NanoslidesError`], so `?` works across crate
//! boundaries.
//!
//! # Examples
//!
//! ```
//! use nanoslides_error::{NanoslidesResult, SlideError, SlideErrorKind};
//!
//! fn lookup(id: &str) -> NanoslidesResult<()> {
//!     Err(SlideError::new(SlideErrorKind::NotFound(id.to_string())))?
//! }
//!
//! assert!(lookup("intro").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod export;
mod gemini;
mod json;
mod slide;
mod storage;
mod style;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{NanoslidesError, NanoslidesErrorKind, NanoslidesResult};
pub use export::{ExportError, ExportErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use json::JsonError;
pub use slide::{SlideError, SlideErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use style::{StyleError, StyleErrorKind};
