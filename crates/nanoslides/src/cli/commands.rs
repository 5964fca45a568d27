//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use nanoslides::{AspectRatio, DeckFormat, ImageModel, Level};
use std::path::PathBuf;

/// nanoslides - Generate and manage AI-powered presentation slides
#[derive(Parser, Debug)]
#[command(name = "nanoslides")]
#[command(about = "Generate and manage AI-powered presentation slides", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a slides project in the current directory or in ./NAME
    Init {
        /// Project name; creates ./NAME/slides.yaml when given
        name: Option<String>,

        /// Overwrite an existing slides.yaml
        #[arg(long)]
        force: bool,
    },

    /// Store a provider API key in ~/.nanoslides/config.toml
    Setup {
        /// API key to store
        #[arg(long)]
        api_key: String,

        /// Provider the key belongs to
        #[arg(long, default_value = "gemini")]
        provider: String,
    },

    /// Generate a slide from a prompt
    Generate {
        /// What the slide should show
        prompt: String,

        /// Image model
        #[arg(long, default_value = "pro")]
        model: ImageModel,

        /// Global style preset id
        #[arg(long)]
        style_id: Option<String>,

        /// Style reference image (repeatable)
        #[arg(long = "references")]
        references: Vec<PathBuf>,

        /// Text file used as context (repeatable)
        #[arg(long = "reference-file")]
        reference_files: Vec<PathBuf>,

        /// Output aspect ratio
        #[arg(long, default_value = "16:9")]
        aspect_ratio: AspectRatio,

        /// Directory for the generated image
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Slide id to use instead of one derived from the prompt
        #[arg(long)]
        id: Option<String>,
    },

    /// Edit a slide image, given a slide id or an image path
    Edit {
        /// Slide id from slides.yaml or an image path
        target: String,

        /// What to change
        instruction: String,

        /// Image model
        #[arg(long, default_value = "pro")]
        model: ImageModel,

        /// Global style preset id
        #[arg(long)]
        style_id: Option<String>,

        /// Style reference image (repeatable)
        #[arg(long = "references")]
        references: Vec<PathBuf>,

        /// Directory for the edited image
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Keep the result as a draft for review instead of replacing the slide
        #[arg(long)]
        draft: bool,
    },

    /// Replace a slide with one of its drafts
    Apply {
        /// Draft id
        draft_id: String,
    },

    /// Throw a draft away
    Discard {
        /// Draft id
        draft_id: String,
    },

    /// List the slides of the project
    List {
        /// Include drafts
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Remove a slide
    Remove {
        /// Slide id
        slide_id: String,
    },

    /// Move a slide to a new 1-based position
    Move {
        /// Slide id
        slide_id: String,

        /// New position
        new_pos: usize,
    },

    /// Delete every slide from slides.yaml
    Clearall {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export slide images into a deck file
    Export {
        /// Directory holding the slide images
        #[arg(long, default_value = "slides")]
        slides_dir: PathBuf,

        /// Output file; defaults to <project dir name>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deck format
        #[arg(long, default_value = "pptx")]
        format: DeckFormat,
    },

    /// Project and global style management
    #[command(subcommand)]
    Style(StyleCommands),

    /// Plan and generate a whole deck from one prompt
    Deck {
        /// What the presentation is about
        prompt: String,

        /// Global style preset id
        #[arg(long, alias = "style")]
        style_id: Option<String>,

        /// Style reference image (repeatable)
        #[arg(long = "references")]
        references: Vec<PathBuf>,

        /// Text file used as context (repeatable)
        #[arg(long = "reference-file")]
        reference_files: Vec<PathBuf>,

        /// Image model for the slides
        #[arg(long, default_value = "pro")]
        model: ImageModel,

        /// Aspect ratio of every slide
        #[arg(long, default_value = "16:9")]
        aspect_ratio: AspectRatio,

        /// Intended audience
        #[arg(long)]
        audience: Option<String>,

        /// Where the deck will be used
        #[arg(long)]
        use_case: Option<String>,

        /// Talk length in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration_minutes: Option<u32>,

        /// Number of slides
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=40))]
        slide_count: Option<u64>,

        /// How technical the content should be
        #[arg(long, default_value = "medium")]
        detail_level: Level,

        /// How illustration-heavy the visuals should be
        #[arg(long, default_value = "medium")]
        illustration_level: Level,

        /// Content language
        #[arg(long, default_value = "en")]
        language: String,

        /// Directory for the generated images
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Style subcommands
#[derive(Subcommand, Debug)]
pub enum StyleCommands {
    /// Print the effective style as JSON
    Show {
        /// Global style preset id to layer in
        #[arg(long)]
        style_id: Option<String>,
    },

    /// Update the project style.json
    Set {
        /// Text prepended to every prompt
        #[arg(long)]
        base_prompt: Option<String>,

        /// Things the model should avoid
        #[arg(long)]
        negative_prompt: Option<String>,

        /// Style reference image (repeatable, replaces the current list)
        #[arg(long = "reference")]
        references: Vec<String>,

        /// Note about the references (repeatable, replaces the current list)
        #[arg(long = "comment")]
        comments: Vec<String>,

        /// Global style preset id to layer underneath
        #[arg(long)]
        style_id: Option<String>,

        /// Start from an empty style instead of the current one
        #[arg(long)]
        clear: bool,
    },

    /// Save the project style to the global registry
    SaveGlobal {
        /// Registry id
        name: String,
    },

    /// List global styles
    List,

    /// Remove a global style
    Remove {
        /// Registry id
        name: String,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
