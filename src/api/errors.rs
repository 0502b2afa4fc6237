// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::providers::ProviderError;

/// Fixed message returned to clients when image generation fails
pub const IMAGE_GENERATION_FAILED: &str = "Image generation failed";

/// Body of every error response produced by the relay
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Handler-boundary errors.
///
/// Chat and image failures deliberately differ in what reaches the client:
/// chat errors expose the provider error text, image errors expose only
/// [`IMAGE_GENERATION_FAILED`].
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed JSON extraction
    InvalidBody(JsonRejection),
    /// Chat provider call failed; the error text is returned to the caller
    ChatFailed(ProviderError),
    /// Image provider call failed; details stay in the server log
    ImageGenerationFailed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::ChatFailed(_) | ApiError::ImageGenerationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let detail = match self {
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            ApiError::ChatFailed(e) => e.to_string(),
            ApiError::ImageGenerationFailed => IMAGE_GENERATION_FAILED.to_string(),
        };
        ErrorResponse { detail }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidBody(rejection) => write!(f, "Invalid request: {}", rejection),
            ApiError::ChatFailed(e) => write!(f, "Chat failed: {}", e),
            ApiError::ImageGenerationFailed => write!(f, "{}", IMAGE_GENERATION_FAILED),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
