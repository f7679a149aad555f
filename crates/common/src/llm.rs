//! Completion API client and test design generation
//!
//! Two flows share one client:
//! - the web form asks for test cases only and treats every failure as
//!   "no cases" ([`generate_cases`]);
//! - the terminal asks for a full design, validates the reply shape, retries
//!   malformed replies a bounded number of times and reports the last error
//!   ([`generate_design`]).

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::extract::{extract_json, strip_code_fence};
use crate::intake::{StoryPayload, StoryRequest};
use crate::normalize::{normalize_cases, normalize_design};
use crate::prompts::{CASES_SYSTEM_PROMPT, DESIGN_SYSTEM_PROMPT};
use crate::types::{TestCase, TestDesign};

/// Top-level keys the terminal flow requires in a reply.
pub const REQUIRED_KEYS: [&str; 4] = ["metadata", "design", "traceability", "test_cases"];

/// A chat-style completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one system + user exchange and return the reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct OpenAiClient {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OpenAiClient {
    /// Fails with [`Error::MissingApiKey`] when the config has no key.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(Error::MissingApiKey);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Pull the reply text out of a chat completion response body.
pub fn completion_content(body: &Value) -> Result<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| Error::Llm("Invalid response format".to_string()))
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        debug!("POST {} (model {})", self.config.completions_url(), self.config.model);
        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("API error ({}): {}", status, text)));
        }

        let json: Value = response.json().await?;
        completion_content(&json)
    }
}

/// Generate test cases for the web form.
///
/// Returns no cases when there is no client, the story is blank, or anything
/// goes wrong along the way.
pub async fn generate_cases(
    client: Option<&dyn CompletionClient>,
    story: &str,
    criteria: &str,
) -> Vec<TestCase> {
    let Some(client) = client else {
        return Vec::new();
    };
    if story.trim().is_empty() {
        return Vec::new();
    }

    let request = StoryRequest::from_form(story, criteria);
    let user = match serde_json::to_string(&request) {
        Ok(user) => user,
        Err(e) => {
            warn!("failed to encode story request: {}", e);
            return Vec::new();
        }
    };

    match client.complete(&CASES_SYSTEM_PROMPT, &user).await {
        Ok(reply) => {
            let data = extract_json(&reply);
            let cases = normalize_cases(data.get("test_cases"));
            info!("generated {} test cases", cases.len());
            cases
        }
        Err(e) => {
            warn!("test case generation failed: {}", e);
            Vec::new()
        }
    }
}

/// Parse a terminal-flow reply: fence-stripped JSON carrying every key in
/// [`REQUIRED_KEYS`].
pub fn parse_design_reply(reply: &str) -> std::result::Result<Value, String> {
    let text = strip_code_fence(reply.trim());
    let data: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let Some(map) = data.as_object() else {
        return Err("Reply is not a JSON object".to_string());
    };
    if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !map.contains_key(**k)) {
        return Err(format!("Missing key '{}'", missing));
    }
    Ok(data)
}

/// Generate a full test design for the terminal flow.
///
/// Malformed replies are retried up to `max_retries` times. Transport and
/// API errors are returned immediately.
pub async fn generate_design(
    client: &dyn CompletionClient,
    payload: &StoryPayload,
    max_retries: u32,
) -> Result<TestDesign> {
    let user = serde_json::to_string(payload)?;
    let mut last_err = String::from("no attempts made");

    for attempt in 1..=max_retries + 1 {
        let reply = client.complete(&DESIGN_SYSTEM_PROMPT, &user).await?;
        match parse_design_reply(&reply) {
            Ok(data) => {
                debug!("design reply accepted on attempt {}", attempt);
                return Ok(normalize_design(&data));
            }
            Err(e) => {
                warn!("attempt {} returned an unusable reply: {}", attempt, e);
                last_err = e;
            }
        }
    }

    Err(Error::Generation(last_err))
}
