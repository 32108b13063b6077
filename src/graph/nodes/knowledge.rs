// Knowledge Node
// Content search over crawled website pages

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::ChatState;

pub struct KnowledgeNode;

impl KnowledgeNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KnowledgeNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for KnowledgeNode {
    fn id(&self) -> &'static str {
        "knowledge"
    }

    fn name(&self) -> &'static str {
        "Knowledge Search"
    }

    async fn execute(
        &self,
        state: &mut ChatState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        match ctx.app_state.page_store.search_best_match(&state.message).await {
            Ok(Some(page)) => {
                tracing::debug!(title = %page.title, "knowledge page matched");
                state.resolve(self.id(), page.as_answer());
                Ok(NodeOutput::Final)
            }
            Ok(None) => Ok(NodeOutput::Continue),
            // A broken backend degrades to the next stage; the caller never
            // sees the failure.
            Err(err) => {
                tracing::warn!("knowledge search unavailable, continuing: {}", err);
                Ok(NodeOutput::Continue)
            }
        }
    }
}
