// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Visualization endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::request::ImageRequest;
use super::response::ImageReply;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::providers::ImageGenerationRequest;

/// Aspect ratio requested for every render
pub const IMAGE_ASPECT_RATIO: &str = "16:9";

/// POST /api/visualize - Render a deck image from a text description
///
/// Pipeline:
/// 1. Wrap the prompt in the render template
/// 2. Ask the image provider for exactly one 16:9 image
/// 3. Return the first image as a JPEG data URI
///
/// Provider failures are logged here and reported to the client only as
/// "Image generation failed".
pub async fn visualize_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageReply>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "Visualize request received: prompt_len={}",
        request.prompt.len()
    );

    let generation_request = ImageGenerationRequest {
        prompt: request.enhanced_prompt(),
        number_of_images: 1,
        aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
    };

    let images = state
        .image_provider
        .generate(&generation_request)
        .await
        .map_err(|e| {
            error!("Image generation error: {}", e);
            ApiError::ImageGenerationFailed
        })?;

    let Some(image) = images.into_iter().next() else {
        error!("Image generation error: provider returned no images");
        return Err(ApiError::ImageGenerationFailed);
    };

    info!(
        "Image generated: {} bytes, provider mime={}",
        image.bytes.len(),
        image.mime_type.as_deref().unwrap_or("unknown")
    );

    Ok(Json(ImageReply::from_jpeg_bytes(&image.bytes)))
}
