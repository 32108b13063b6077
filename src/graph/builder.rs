// Graph Builder
// Constructs the support answer graph

use super::node::GraphError;
use super::nodes::{FaqNode, IntentNode, KnowledgeNode, LlmFallbackNode};
use super::runtime::{GraphBuilder, GraphRuntime};

/// Build the answer pipeline.
///
/// A straight chain: keyword intent lookup, then knowledge-base search, then
/// semantic FAQ match, then the hosted-LLM fallback. Every node either ends
/// the run with an answer or hands off to the next; the LLM node always
/// answers.
pub fn build_support_graph() -> Result<GraphRuntime, GraphError> {
    GraphBuilder::new()
        .entry("intent")
        .max_steps(8)
        .node(Box::new(IntentNode::new()))
        .node(Box::new(KnowledgeNode::new()))
        .node(Box::new(FaqNode::new()))
        .node(Box::new(LlmFallbackNode::new()))
        .edge("intent", "knowledge")
        .edge("knowledge", "faq")
        .edge("faq", "llm")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_graph_builds_with_all_stages() {
        let runtime = build_support_graph().expect("graph builds");

        for id in ["intent", "knowledge", "faq", "llm"] {
            assert!(runtime.get_node(id).is_some(), "missing node {}", id);
        }
    }
}
