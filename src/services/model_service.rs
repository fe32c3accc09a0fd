use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// The generative model behind content generation. One call per prompt,
/// no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> AppResult<String>;
}

/// Talks to any OpenAI-compatible chat completions endpoint. The default
/// configuration points at Gemini's compatibility layer.
pub struct OpenAiModelClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.model_api_key.expose_secret())
            .with_api_base(&config.model_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.model_name.clone(),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn generate_content(&self, prompt: &str) -> AppResult<String> {
        let request = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let response: Value = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| {
                log::error!("Error generating content: {}", e);
                AppError::ModelInvocationFailed(e.to_string())
            })?;

        extract_response_text(&response)
    }
}

/// Text of the first choice. A reply without text is treated as a failed
/// invocation.
fn extract_response_text(response: &Value) -> AppResult<String> {
    match response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => {
            log::error!("Model response contained no text");
            Err(AppError::ModelInvocationFailed(
                "Model returned no text".to_string(),
            ))
        }
    }
}
