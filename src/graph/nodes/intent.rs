// Intent Node
// Keyword small-talk lookup, first stage of the chain

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::ChatState;
use crate::intent::{detect_intent, response_for};

pub struct IntentNode;

impl IntentNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IntentNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for IntentNode {
    fn id(&self) -> &'static str {
        "intent"
    }

    fn name(&self) -> &'static str {
        "Intent Matcher"
    }

    async fn execute(
        &self,
        state: &mut ChatState,
        _ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let intent = detect_intent(&state.message);

        match response_for(intent) {
            Some(reply) => {
                tracing::debug!(intent = intent.as_str(), "intent matched");
                state.resolve(self.id(), reply);
                Ok(NodeOutput::Final)
            }
            None => Ok(NodeOutput::Continue),
        }
    }
}
