use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Interpreter;
use crate::foundation::config::BackendConfig;
use crate::foundation::error::{ArcanaError, ArcanaResult};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    n: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone, Debug)]
pub struct OpenAiInterpreter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiInterpreter {
    pub fn new(config: &BackendConfig, api_key: Option<String>) -> ArcanaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Read the bearer token from the environment variable named in `config`.
    pub fn from_env(config: &BackendConfig) -> ArcanaResult<Self> {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(var = %config.api_key_env, "no API key in environment");
        }
        Self::new(config, api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Interpreter for OpenAiInterpreter {
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> ArcanaResult<String> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user_prompt,
        });
        let body = ChatRequest {
            model: &self.model,
            n: 1,
            messages,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion");
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ArcanaError::backend(format!(
                "chat completion returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ArcanaError::backend("chat completion returned no choices"))
    }
}
