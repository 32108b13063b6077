// LangGraph-style StateGraph for the answer pipeline.

pub mod builder;
pub mod node;
pub mod nodes;
pub mod runtime;
pub mod state;

pub use builder::build_support_graph;
pub use node::{GraphError, Node, NodeContext, NodeOutput};
pub use runtime::{GraphBuilder, GraphRuntime};
pub use state::ChatState;
