// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Outbound AI provider clients
//!
//! Handlers only see the [`ChatProvider`] and [`ImageProvider`] traits; the
//! concrete reqwest clients are built once at startup and injected through
//! the router state.

pub mod imagen;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use imagen::ImagenClient;
pub use openai::OpenAiChatClient;

/// A single role/content pair sent to the chat provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Convert into the raw JSON form used for the outbound conversation
    pub fn into_value(self) -> serde_json::Value {
        serde_json::json!({ "role": self.role, "content": self.content })
    }
}

/// Parameters for a single image generation call
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub aspect_ratio: String,
}

/// One image returned by the image provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    /// Decoded image bytes
    pub bytes: Vec<u8>,
    /// MIME type reported by the provider, if any
    pub mime_type: Option<String>,
}

/// Errors raised while contacting a provider or reading its response
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, including timeouts
    #[error("request to provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Response parsed but carried no result
    #[error("provider returned no results")]
    EmptyResponse,

    /// Image payload was not valid base64
    #[error("invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Text-generation provider
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send an ordered conversation and return the first generated reply.
    ///
    /// `messages` are forwarded verbatim; entries are not validated here.
    async fn complete(
        &self,
        messages: &[serde_json::Value],
        max_tokens: u32,
    ) -> Result<String, ProviderError>;
}

/// Image-generation provider
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>, ProviderError>;
}

/// Extract a human readable message from a provider error body.
///
/// Both OpenAI and Google wrap failures as `{"error": {"message": ...}}`;
/// anything else is returned as the raw body text.
pub(crate) fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
