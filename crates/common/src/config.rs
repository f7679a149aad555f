//! Completion API configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Deterministic sampling unless a caller or config file asks otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Settings for the completion API. Built once at startup and passed to
/// every generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// API key; generation is disabled without one
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Extra attempts after a malformed reply (terminal flow only)
    pub max_retries: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_retries: 2,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GeneratorConfig {
    /// Defaults overridden by `OPENAI_API_KEY`, `OPENAI_BASE_URL` and
    /// `STORYCASE_MODEL`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a TOML file, then apply environment
    /// overrides. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_file(path)?.with_env_overrides())
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(key) = non_empty_env("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty_env("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = non_empty_env("STORYCASE_MODEL") {
            self.model = model;
        }
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Chat completions endpoint under the configured base URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
