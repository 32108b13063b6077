// LLM Fallback Node
// Terminal stage: always produces an answer string

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::ChatState;
use crate::llm::{ChatMessage, ChatRequest, ProviderError};

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant for the company support desk. Reply in a helpful and polite tone.";

/// Reply when the hosted model answered with a non-success status.
pub const LLM_ERROR_REPLY: &str =
    "Sorry, the assistant could not process your request right now. Please try again later.";

/// Reply when the hosted model was unreachable or sent back garbage.
pub const SERVER_ERROR_REPLY: &str =
    "Sorry, something went wrong on our side. Please try again in a moment.";

pub struct LlmFallbackNode;

impl LlmFallbackNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LlmFallbackNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for LlmFallbackNode {
    fn id(&self) -> &'static str {
        "llm"
    }

    fn name(&self) -> &'static str {
        "LLM Fallback"
    }

    async fn execute(
        &self,
        state: &mut ChatState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(state.message.clone()),
        ])
        .with_temperature(ctx.app_state.config.llm.temperature);

        let answer = match ctx.app_state.chat_provider.chat(request).await {
            Ok(reply) => reply,
            Err(err @ ProviderError::BadStatus { .. }) => {
                tracing::warn!("llm fallback rejected: {}", err);
                LLM_ERROR_REPLY.to_string()
            }
            Err(err) => {
                tracing::warn!("llm fallback unreachable: {}", err);
                SERVER_ERROR_REPLY.to_string()
            }
        };

        state.resolve(self.id(), answer);
        Ok(NodeOutput::Final)
    }
}
