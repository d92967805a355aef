//! Runtime configuration.
//!
//! Loaded from a JSON file (`roomreg.json` by default, overridable with
//! `ROOMREG_CONFIG`), with a few environment overrides on top so deployments
//! can keep the API key out of the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub base_url: String,
    pub api_key: String,
    /// Model substrings tried in order during discovery.
    pub preferred_models: Vec<String>,
    /// Used when discovery finds nothing usable.
    pub fallback_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "classroom.db".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: String::new(),
            preferred_models: vec![
                "gemini-1.5-flash".to_string(),
                "gemini-1.5-pro".to_string(),
                "gemini-pro".to_string(),
            ],
            fallback_model: "gemini-pro".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from disk, falling back to defaults when the file
    /// is absent, then applies environment overrides.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = std::env::var("ROOMREG_CONFIG").unwrap_or_else(|_| "roomreg.json".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            AppConfig::default()
        };

        if let Ok(db_path) = std::env::var("ROOMREG_DB") {
            config.db_path = db_path;
        }
        if let Ok(bind_addr) = std::env::var("ROOMREG_BIND") {
            config.bind_addr = bind_addr;
        }
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            config.assistant.api_key = api_key;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, "classroom.db");
        assert_eq!(config.assistant.preferred_models.len(), 3);
        assert_eq!(config.assistant.fallback_model, "gemini-pro");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "db_path": "/var/lib/roomreg.db" }"#).unwrap();
        assert_eq!(config.db_path, "/var/lib/roomreg.db");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(!config.assistant.base_url.is_empty());
    }

    #[test]
    fn test_nested_assistant_section() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "assistant": { "api_key": "k", "preferred_models": ["gemini-2.0-flash"] } }"#,
        )
        .unwrap();
        assert_eq!(config.assistant.api_key, "k");
        assert_eq!(config.assistant.preferred_models, vec!["gemini-2.0-flash"]);
    }
}
