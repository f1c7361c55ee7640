use crate::config::GenerationConfig;
use crate::error::AgentError;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Text produced by a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub content: String,
}

/// Single-shot text generation. Implementations keep no history between calls.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, AgentError>;
}

pub struct OpenAiClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl OpenAiClient {
    pub fn new(config: GenerationConfig) -> Result<Self, AgentError> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::ClientInit("No API key provided for OpenAI".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::ClientInit(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Generator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, AgentError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let payload = json!({
            "model": self.config.model.id(),
            "messages": [{ "role": "user", "content": prompt }]
        });

        log::debug!("Calling {} ({} prompt chars)", self.config.model, prompt.len());

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let err_text = res.text().await.unwrap_or_default();
            log::error!("OpenAI API Error: {}", err_text);
            return Err(AgentError::GenerationFailed(format!("API Error {status}: {err_text}")));
        }

        let body: Value = res.json().await?;
        completion_text(&body)
    }
}

fn completion_text(body: &Value) -> Result<Generation, AgentError> {
    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| AgentError::GenerationFailed("No text content returned".into()))?;

    Ok(Generation {
        content: content.to_string(),
    })
}
