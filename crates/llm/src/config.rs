// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::LlmError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Configuration for the OpenAI-compatible text-generation backend.
///
/// Standardization prompts run at a low temperature: the engine wants
/// consolidation, not creativity.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer API key. Never empty once constructed.
    pub api_key: String,
    /// Base URL without the `/chat/completions` suffix. Proxies such as
    /// LiteLLM deployments are supported by overriding this.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token ceiling.
    pub max_tokens: u32,
}

impl AiConfig {
    /// Creates a configuration with explicit values.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The bearer API key
    /// * `base_url` - The backend base URL (trailing slashes are trimmed)
    /// * `model` - The model identifier
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if the key is empty or blank.
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Builds a configuration from the process environment.
    ///
    /// `ROLEMAP_AI_API_KEY` is required; `ROLEMAP_AI_BASE_URL` and
    /// `ROLEMAP_AI_MODEL` fall back to the OpenAI defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if the key variable is unset or
    /// blank.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("ROLEMAP_AI_API_KEY").unwrap_or_default();
        let base_url = std::env::var("ROLEMAP_AI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("ROLEMAP_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(&api_key, &base_url, &model)
    }

    /// Returns the full chat-completions endpoint URL.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
