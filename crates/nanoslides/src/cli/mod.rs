//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the nanoslides binary.

mod commands;
mod deck;
mod export;
mod project;
mod render;
mod setup;
mod slides;
mod style;

pub use commands::{Cli, Commands};
pub use deck::deck;
pub use export::export;
pub use project::{apply, clear_all, discard, init, list, move_slide, remove};
pub use render::failure;
pub use setup::setup;
pub use slides::{edit, generate};
pub use style::handle_style_command;

impl Commands {
    /// Short description of the command for failure messages.
    pub fn action(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "Project initialization failed",
            Commands::Setup { .. } => "Setup failed",
            Commands::Generate { .. } => "Slide generation failed",
            Commands::Edit { .. } => "Slide edit failed",
            Commands::Apply { .. } => "Applying draft failed",
            Commands::Discard { .. } => "Discarding draft failed",
            Commands::List { .. } => "Listing slides failed",
            Commands::Remove { .. } => "Removing slide failed",
            Commands::Move { .. } => "Moving slide failed",
            Commands::Clearall { .. } => "Clearing slides failed",
            Commands::Export { .. } => "Export failed",
            Commands::Style(_) => "Style command failed",
            Commands::Deck { .. } => "Presentation generation failed",
        }
    }
}
