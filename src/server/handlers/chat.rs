use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::graph::{ChatState, NodeContext};
use crate::state::AppState;

/// Shown with a 400 when the message is empty after trimming.
pub const EMPTY_MESSAGE_PROMPT: &str = "Please enter a message.";

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = payload.message.trim().to_lowercase();
    if message.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_MESSAGE_PROMPT.to_string()));
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async {
        let mut chat_state = ChatState::new(message);
        let ctx = NodeContext { app_state: &state };

        state.graph_runtime.run(&mut chat_state, &ctx).await?;

        let answer = chat_state
            .answer
            .ok_or_else(|| ApiError::Internal("pipeline produced no answer".to_string()))?;
        tracing::info!(stage = ?chat_state.resolved_by, "answered");

        Ok(Json(ChatResponse { answer }))
    }
    .instrument(span)
    .await
}
