// Graph Nodes Module
// One node per resolver stage

pub mod faq;
pub mod intent;
pub mod knowledge;
pub mod llm;

pub use faq::FaqNode;
pub use intent::IntentNode;
pub use knowledge::KnowledgeNode;
pub use llm::LlmFallbackNode;
