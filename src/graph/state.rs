// Graph State
// Per-request state carried through the resolver chain

/// State for one chat request. Created after input normalization, dropped
/// once the response is sent; no history survives between requests.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Normalized user message (trimmed, lower-cased).
    pub message: String,
    /// Final answer, set by exactly one resolver.
    pub answer: Option<String>,
    /// ID of the node that produced the answer.
    pub resolved_by: Option<&'static str>,
}

impl ChatState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            answer: None,
            resolved_by: None,
        }
    }

    pub fn resolve(&mut self, node_id: &'static str, answer: impl Into<String>) {
        self.answer = Some(answer.into());
        self.resolved_by = Some(node_id);
    }
}
