// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat request types and conversation assembly

use serde::{Deserialize, Serialize};

use crate::providers::ChatMessage;

/// Request for POST /api/chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// New message from the user
    pub message: String,

    /// Prior turns supplied by the client, replayed verbatim
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

impl ChatRequest {
    /// Build the outbound conversation: system prompt, history in the given
    /// order, then the new user message.
    pub fn to_messages(&self, system_prompt: &str) -> Vec<serde_json::Value> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(system_prompt).into_value());
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(self.message.clone()).into_value());
        messages
    }
}
