use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CoachError, Result};
use crate::llm::{ChatModel, GeminiClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub llm: LlmSettings,
    pub paths: PathSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Durable conversation file. Relative paths resolve against the
    /// working directory.
    pub history_file: PathBuf,
    /// Prompt template used for run-feedback submissions.
    pub template_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmSettings {
                model: "gemini-2.0-flash".to_string(),
                api_key_env: "GOOGLE_API_KEY".to_string(),
                base_url: None,
                max_output_tokens: 2048,
            },
            paths: PathSettings {
                history_file: PathBuf::from("coach_history.json"),
                template_file: PathBuf::from("prompts/run_feedback.txt"),
            },
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stride")
            .join("config.toml")
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoachError::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable named in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env).ok()
    }

    /// Build the remote chat model from the current settings.
    pub fn build_chat_model(&self) -> Result<Box<dyn ChatModel>> {
        let api_key = self.api_key().ok_or_else(|| {
            CoachError::Config(format!(
                "environment variable {} is not set",
                self.llm.api_key_env
            ))
        })?;

        let mut client = GeminiClient::new(api_key)
            .with_model(&self.llm.model)
            .with_max_output_tokens(self.llm.max_output_tokens);
        if let Some(ref url) = self.llm.base_url {
            client = client.with_base_url(url);
        }
        Ok(Box::new(client))
    }
}
