//! Test utilities for nanoslides workflow tests.
//!
//! This module provides mock collaborators and workspace helpers.

pub mod mock_engine;

#[allow(unused_imports)]
pub use mock_engine::{MockBehavior, MockPlanner, MockSlideEngine, png_bytes};

use chrono::Utc;
use nanoslides::{NanoslidesConfig, NanoslidesPaths, Presentation, Workspace};
use std::path::Path;

/// Workspace with its project in `root/project` and global files in
/// `root/global`.
#[allow(dead_code)]
pub fn workspace_in(root: &Path) -> Workspace {
    let paths = NanoslidesPaths::new(root.join("project"), root.join("global"));
    Workspace::new(paths, NanoslidesConfig::default())
}

/// Same as [`workspace_in`] with an empty `slides.yaml` already written.
#[allow(dead_code)]
pub fn project_in(root: &Path) -> anyhow::Result<Workspace> {
    let workspace = workspace_in(root);
    let presentation = Presentation::new("demo", Utc::now(), "nanobanana");
    workspace.project_store().save(&presentation)?;
    Ok(workspace)
}
