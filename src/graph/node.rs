// Node trait and types
// Base abstraction for graph nodes

use async_trait::async_trait;

use crate::core::errors::ApiError;
use crate::state::AppState;

use super::state::ChatState;

/// Context passed to nodes during execution.
pub struct NodeContext<'a> {
    /// Application state (stores, providers, config).
    pub app_state: &'a AppState,
}

/// Output from a node execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutput {
    /// No answer here; advance along the node's outgoing edge.
    Continue,
    /// Graph execution complete; the state carries the answer.
    Final,
}

/// Graph execution error.
#[derive(Debug, Clone)]
pub struct GraphError {
    pub node_id: String,
    pub message: String,
}

impl GraphError {
    pub fn new(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            message: message.into(),
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        ApiError::Internal(format!("graph error in {}: {}", err.node_id, err.message))
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GraphError in {}: {}", self.node_id, self.message)
    }
}

impl std::error::Error for GraphError {}

/// Node trait - all graph nodes implement this
#[async_trait]
pub trait Node: Send + Sync {
    /// Unique identifier for this node
    fn id(&self) -> &'static str;

    /// Human-readable name for display
    fn name(&self) -> &'static str {
        self.id()
    }

    /// Execute the node logic
    async fn execute(
        &self,
        state: &mut ChatState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError>;
}
