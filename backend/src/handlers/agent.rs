//! HTTP handler for the farm assistant

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::agent::{ChatReply, ChatRequest};
use crate::AppState;

/// Answer the last user message of the posted conversation
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let reply = state.agent.chat(request).await?;
    Ok(Json(reply))
}
