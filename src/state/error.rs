use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[source] anyhow::Error),

    #[error("Failed to initialize knowledge store: {0}")]
    Knowledge(#[source] anyhow::Error),

    #[error("Failed to build FAQ index: {0}")]
    Faq(#[source] anyhow::Error),

    #[error("Failed to build answer graph: {0}")]
    Graph(#[source] anyhow::Error),

    #[error("Failed to initialize LLM provider: {0}")]
    Llm(#[source] anyhow::Error),
}
