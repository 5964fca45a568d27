//! Setup command handler.

use nanoslides::{ConfigError, ConfigErrorKind, GEMINI_PROVIDER, NanoslidesResult, Workspace};
use tracing::info;

/// Store an API key in the global configuration file.
pub fn setup(workspace: &Workspace, provider: &str, api_key: &str) -> NanoslidesResult<()> {
    let provider = provider.trim().to_lowercase();
    if provider != GEMINI_PROVIDER {
        return Err(ConfigError::new(ConfigErrorKind::UnsupportedProvider {
            provider,
            supported: GEMINI_PROVIDER.to_string(),
        })
        .into());
    }

    let mut config = workspace.config().clone();
    config.set_api_key(&provider, api_key)?;
    let path = workspace.paths().config_file();
    config.save(path)?;

    info!(provider = %provider, "Stored API key");
    println!("Saved {} to {}.", provider, path.display());
    println!("Default engine: {}", config.default_engine);
    Ok(())
}
