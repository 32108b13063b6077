use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::{ChatProvider, EmbeddingProvider, ProviderError};
use super::types::ChatRequest;
use crate::core::config::LlmConfig;
use crate::core::errors::ApiError;

/// OpenAI-compatible hosted API client (OpenRouter by default).
///
/// Serves both chat completions and embeddings against the same API root.
/// Auth is a bearer token resolved from config first, then the
/// `OPENROUTER_API_KEY` environment variable.
#[derive(Clone)]
pub struct OpenRouterProvider {
    base_url: String,
    api_key: String,
    model: String,
    embedding_model: String,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, ApiError> {
        let api_key = if config.api_key.is_empty() {
            env::var("OPENROUTER_API_KEY").unwrap_or_default()
        } else {
            config.api_key.clone()
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::internal)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            embedding_model: config.embedding_model.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "stream": false,
        });
        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.temperature {
                obj.insert("temperature".to_string(), json!(t));
            }
            if let Some(m) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(m));
            }
        }

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = res
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        parse_chat_content(&payload)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenRouterProvider {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let url = format!("{}/embeddings", self.base_url);

        let body = json!({
            "model": self.embedding_model,
            "input": inputs,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = res
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        parse_embeddings(&payload, inputs.len())
    }
}

fn parse_chat_content(payload: &Value) -> Result<String, ProviderError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|content| content.to_string())
        .ok_or_else(|| {
            ProviderError::Malformed("missing choices[0].message.content".to_string())
        })
}

fn parse_embeddings(payload: &Value, expected: usize) -> Result<Vec<Vec<f32>>, ProviderError> {
    let data = payload["data"]
        .as_array()
        .ok_or_else(|| ProviderError::Malformed("missing data array".to_string()))?;

    let mut embeddings = Vec::with_capacity(data.len());
    for item in data {
        let values = item["embedding"]
            .as_array()
            .ok_or_else(|| ProviderError::Malformed("missing embedding values".to_string()))?;
        let vector: Vec<f32> = values
            .iter()
            .filter_map(|v| v.as_f64().map(|f| f as f32))
            .collect();
        embeddings.push(vector);
    }

    if embeddings.len() != expected {
        return Err(ProviderError::Malformed(format!(
            "expected {} embeddings, got {}",
            expected,
            embeddings.len()
        )));
    }

    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_first_choice_content() {
        let payload = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Hello there." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });

        let content = parse_chat_content(&payload).expect("content parses");
        assert_eq!(content, "Hello there.");
    }

    #[test]
    fn missing_content_is_malformed() {
        let payload = json!({ "choices": [] });
        assert!(matches!(
            parse_chat_content(&payload),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn parses_embeddings_in_order() {
        let payload = json!({
            "data": [
                { "embedding": [0.1, 0.2] },
                { "embedding": [0.3, 0.4] }
            ]
        });

        let embeddings = parse_embeddings(&payload, 2).expect("embeddings parse");
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[1], vec![0.3, 0.4]);
    }

    #[test]
    fn embedding_count_mismatch_is_malformed() {
        let payload = json!({ "data": [ { "embedding": [0.1] } ] });
        assert!(matches!(
            parse_embeddings(&payload, 2),
            Err(ProviderError::Malformed(_))
        ));
    }
}
