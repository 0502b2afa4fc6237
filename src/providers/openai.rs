// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat completion client for OpenAI-compatible APIs

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::{error_message_from_body, ChatProvider, ProviderError};

// --- OpenAI-compatible serde structs ---

#[derive(Debug, serde::Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [serde_json::Value],
    pub max_tokens: u32,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice
    pub fn into_first_reply(self) -> std::result::Result<String, ProviderError> {
        let first = self
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;
        first.message.content.ok_or_else(|| {
            ProviderError::MalformedResponse("first choice has no message content".to_string())
        })
    }
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint
pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl OpenAiChatClient {
    /// Create a new chat client
    pub fn new(endpoint: &str, api_key: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Chat client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
            model_name: model_name.to_string(),
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[serde_json::Value],
        max_tokens: u32,
    ) -> std::result::Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model_name,
            messages,
            max_tokens,
        };

        let url = self.completions_url();
        debug!("Chat completion POST {} ({} messages)", url, messages.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message_from_body(&text),
            });
        }

        let body = response.text().await?;
        let chat_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        chat_response.into_first_reply()
    }
}
