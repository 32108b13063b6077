// FAQ Node
// Semantic match against the embedded FAQ corpus

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::ChatState;

pub struct FaqNode;

impl FaqNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FaqNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for FaqNode {
    fn id(&self) -> &'static str {
        "faq"
    }

    fn name(&self) -> &'static str {
        "FAQ Matcher"
    }

    async fn execute(
        &self,
        state: &mut ChatState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let index = &ctx.app_state.faq_index;
        if index.is_empty() {
            return Ok(NodeOutput::Continue);
        }

        let embeddings = match ctx
            .app_state
            .embedder
            .embed(std::slice::from_ref(&state.message))
            .await
        {
            Ok(embeddings) => embeddings,
            Err(err) => {
                tracing::warn!("query embedding failed, continuing: {}", err);
                return Ok(NodeOutput::Continue);
            }
        };

        let Some(query_embedding) = embeddings.first() else {
            tracing::warn!("embedding provider returned no vectors, continuing");
            return Ok(NodeOutput::Continue);
        };

        match index.best_match(query_embedding) {
            Some((entry, score)) => {
                tracing::debug!(score, question = %entry.question, "faq matched");
                state.resolve(self.id(), entry.answer.clone());
                Ok(NodeOutput::Final)
            }
            None => Ok(NodeOutput::Continue),
        }
    }
}
