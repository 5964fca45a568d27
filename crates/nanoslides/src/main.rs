//! nanoslides CLI binary.
//!
//! This binary provides command-line access to nanoslides:
//! - Initialize a project and manage its slides
//! - Generate and edit slides with Gemini image models
//! - Plan and generate whole decks, then export them as PPTX

use clap::Parser;
use nanoslides::{
    DeckOptions, EditOptions, GenerateOptions, NanoslidesPaths, NanoslidesResult, Workspace,
    init_logging,
};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    init_logging(cli.verbose, cli.json).map_err(|e| e as Box<dyn std::error::Error>)?;

    let action = cli.command.action();
    if let Err(error) = run(cli.command).await {
        tracing::debug!(error = %error, "Command failed");
        cli::failure(&error, action);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands) -> NanoslidesResult<()> {
    let project_dir = std::env::current_dir().map_err(|e| {
        nanoslides::ConfigError::new(nanoslides::ConfigErrorKind::CurrentDirectory(e.to_string()))
    })?;
    let workspace = Workspace::load(NanoslidesPaths::for_project(project_dir)?)?;

    // Execute the requested command
    match command {
        Commands::Init { name, force } => cli::init(&workspace, name, force),

        Commands::Setup { api_key, provider } => cli::setup(&workspace, &provider, &api_key),

        Commands::Generate {
            prompt,
            model,
            style_id,
            references,
            reference_files,
            aspect_ratio,
            output_dir,
            id,
        } => {
            let options = GenerateOptions {
                prompt,
                style_id,
                references,
                reference_files,
                aspect_ratio,
                output_dir,
                slide_id: id,
            };
            cli::generate(&workspace, model, options).await
        }

        Commands::Edit {
            target,
            instruction,
            model,
            style_id,
            references,
            output_dir,
            draft,
        } => {
            let options = EditOptions {
                target,
                instruction,
                style_id,
                references,
                output_dir,
                draft,
            };
            cli::edit(&workspace, model, options).await
        }

        Commands::Apply { draft_id } => cli::apply(&workspace, &draft_id),

        Commands::Discard { draft_id } => cli::discard(&workspace, &draft_id),

        Commands::List { all, format } => cli::list(&workspace, all, format),

        Commands::Remove { slide_id } => cli::remove(&workspace, &slide_id),

        Commands::Move { slide_id, new_pos } => cli::move_slide(&workspace, &slide_id, new_pos),

        Commands::Clearall { yes } => cli::clear_all(&workspace, yes),

        Commands::Export {
            slides_dir,
            output,
            format,
        } => cli::export(&workspace, &slides_dir, output, format),

        Commands::Style(style_cmd) => cli::handle_style_command(&workspace, style_cmd),

        Commands::Deck {
            prompt,
            style_id,
            references,
            reference_files,
            model,
            aspect_ratio,
            audience,
            use_case,
            duration_minutes,
            slide_count,
            detail_level,
            illustration_level,
            language,
            output_dir,
        } => {
            let options = DeckOptions {
                prompt,
                audience,
                use_case,
                duration_minutes,
                slide_count: slide_count.map(|count| count as usize),
                detail_level,
                illustration_level,
                language,
                style_id,
                references,
                reference_files,
                aspect_ratio,
                output_dir,
            };
            cli::deck(&workspace, model, options).await
        }
    }
}
