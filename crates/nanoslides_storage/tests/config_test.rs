use nanoslides_storage::{DEFAULT_ENGINE, GEMINI_PROVIDER, NanoslidesConfig};
use std::path::PathBuf;

#[test]
fn missing_file_yields_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = NanoslidesConfig::load(dir.path().join("config.toml"))?;
    assert_eq!(config, NanoslidesConfig::default());
    Ok(())
}

#[test]
fn save_then_load_keeps_keys() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("config.toml");

    let mut config = NanoslidesConfig::default();
    config.set_api_key("Gemini", "  secret-key ")?;
    config.default_output_dir = PathBuf::from("./renders");
    config.save(&path)?;

    let raw = std::fs::read_to_string(&path)?;
    assert!(raw.contains("[api_keys]"));
    assert!(raw.contains("gemini = \"secret-key\""));

    let loaded = NanoslidesConfig::load(&path)?;
    assert_eq!(loaded.api_keys.get(GEMINI_PROVIDER).map(String::as_str), Some("secret-key"));
    assert_eq!(loaded.default_output_dir, PathBuf::from("./renders"));
    assert_eq!(loaded.default_engine, DEFAULT_ENGINE);
    Ok(())
}

#[test]
fn partial_file_fills_in_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_output_dir = \"out\"\n")?;

    let config = NanoslidesConfig::load(&path)?;
    assert_eq!(config.default_engine, DEFAULT_ENGINE);
    assert_eq!(config.default_output_dir, PathBuf::from("out"));
    assert!(config.api_keys.is_empty());
    Ok(())
}

#[test]
fn invalid_toml_is_a_config_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "default_engine = [unterminated")?;
    let err = NanoslidesConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
    Ok(())
}

#[test]
fn blank_api_key_is_rejected() {
    let mut config = NanoslidesConfig::default();
    assert!(config.set_api_key("gemini", "   ").is_err());
    assert!(config.api_keys.is_empty());
}

#[test]
fn gemini_key_precedence() {
    let mut config = NanoslidesConfig::default();
    let env = |name: &str| match name {
        "GEMINI_API_KEY" => Some("from-gemini-env".to_string()),
        "GOOGLE_API_KEY" => Some("from-google-env".to_string()),
        _ => None,
    };

    assert_eq!(
        config.gemini_api_key_with(None, env).as_deref(),
        Some("from-gemini-env")
    );

    config.set_api_key("gemini", "from-config").unwrap();
    assert_eq!(
        config.gemini_api_key_with(None, env).as_deref(),
        Some("from-config")
    );
    assert_eq!(
        config.gemini_api_key_with(Some("explicit"), env).as_deref(),
        Some("explicit")
    );
    assert_eq!(
        config.gemini_api_key_with(Some("  "), env).as_deref(),
        Some("from-config")
    );
}

#[test]
fn google_key_is_last_resort() {
    let config = NanoslidesConfig::default();
    let env = |name: &str| (name == "GOOGLE_API_KEY").then(|| "google".to_string());
    assert_eq!(config.gemini_api_key_with(None, env).as_deref(), Some("google"));
    assert_eq!(config.gemini_api_key_with(None, |_| None), None);
}
