// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::AiConfig;
use crate::error::LlmError;
use crate::generator::TextGenerator;
use crate::types::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The production chat-completions client.
///
/// Works against api.openai.com and OpenAI-compatible proxies alike; the
/// request body carries only the fields every compatible backend accepts.
#[derive(Debug)]
pub struct OpenAiGenerator {
    config: AiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a generator from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if no API key is configured.
    pub fn from_env() -> Result<Self, LlmError> {
        AiConfig::from_env().map(Self::new)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = RequestBody {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(text),
                429 => LlmError::RateLimited(text),
                400..=499 => LlmError::InvalidRequest(text),
                _ => LlmError::Api(format!("status {status}: {text}")),
            });
        }

        let parsed: ResponseBody =
            serde_json::from_str(&text).map_err(|e| LlmError::Parsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyReply)
    }
}
