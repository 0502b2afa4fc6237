// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::request::ChatRequest;
use super::response::ChatReply;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// Persona given to the chat provider ahead of every conversation
pub const SYSTEM_PROMPT: &str = "You are a helpful Deck Design Consultant for Silverback Web Design. \
concise, professional, and focus on gathering requirements for a deck (size, material, budget).";

/// POST /api/chat - Relay one conversational turn to the chat provider
///
/// The outbound conversation is the system prompt, the client's history as
/// given, then the new message. Provider errors are returned to the client
/// with their text intact.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "Chat request received: message_len={}, history_len={}",
        request.message.len(),
        request.history.len()
    );

    let messages = request.to_messages(SYSTEM_PROMPT);

    let reply = state
        .chat_provider
        .complete(&messages, state.chat_max_tokens)
        .await
        .map_err(|e| {
            warn!("Chat provider call failed: {}", e);
            ApiError::ChatFailed(e)
        })?;

    info!(
        "Chat reply generated: {} messages sent, reply_len={}",
        messages.len(),
        reply.len()
    );

    Ok(Json(ChatReply { reply }))
}
