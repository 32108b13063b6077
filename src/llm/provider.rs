use async_trait::async_trait;
use thiserror::Error;

use super::types::ChatRequest;

/// Failure classes for hosted model calls. `BadStatus` is an answer from the
/// service itself; the other two never reached a usable response.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider returned status {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Chat completion (non-streaming); returns the assistant reply verbatim.
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError>;
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed each input into a fixed-dimension vector, in input order.
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;
}
