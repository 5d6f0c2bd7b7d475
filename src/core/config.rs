use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::{default_safety_settings, GenerationConfig, SafetySetting};

pub const DEFAULT_MODEL: &str = "gemini-1.0-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Persisted preferences, stored as toml under the platform config
/// directory. Everything is optional; CLI flags take precedence.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// UI theme name ("light" or "dark").
    pub theme: Option<String>,
    /// Model identifier to chat with.
    pub model: Option<String>,
    /// Override for the API base URL.
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn std::error::Error>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(&Self::config_path())
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "gemterm", "gemterm")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }
}

/// Everything the session adapter needs, assembled once at startup. The
/// credential is threaded through here explicitly; the adapter never reads
/// the process environment itself.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub generation: GenerationConfig,
    pub safety: Vec<SafetySetting>,
}

impl SessionConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: Option<&str>) -> Self {
        SessionConfig {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            generation: GenerationConfig::default(),
            safety: default_safety_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            theme: Some("dark".to_string()),
            model: Some("gemini-1.0-pro".to_string()),
            base_url: None,
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn session_config_defaults_to_published_endpoint() {
        let session = SessionConfig::new("key", DEFAULT_MODEL, None);
        assert_eq!(session.base_url, DEFAULT_BASE_URL);
        assert_eq!(session.generation.max_output_tokens, 2048);
        assert_eq!(session.safety.len(), 4);
    }
}
