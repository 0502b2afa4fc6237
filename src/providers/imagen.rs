// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Imagen client for the Google Generative Language `:predict` API

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{
    error_message_from_body, GeneratedImage, ImageGenerationRequest, ImageProvider, ProviderError,
};

// --- Wire types ---

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}

impl From<&ImageGenerationRequest> for PredictRequest {
    fn from(request: &ImageGenerationRequest) -> Self {
        Self {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
            },
        }
    }
}

impl PredictResponse {
    /// Decode every prediction carrying image bytes.
    ///
    /// Predictions without a payload (e.g. filtered by the provider) are
    /// skipped; an empty result is an error.
    pub fn into_images(self) -> std::result::Result<Vec<GeneratedImage>, ProviderError> {
        let mut images = Vec::with_capacity(self.predictions.len());
        for prediction in self.predictions {
            let Some(encoded) = prediction.bytes_base64_encoded else {
                continue;
            };
            images.push(GeneratedImage {
                bytes: STANDARD.decode(encoded)?,
                mime_type: prediction.mime_type,
            });
        }
        if images.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(images)
    }
}

/// Client for Imagen models served by the Generative Language API
pub struct ImagenClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model_name: String,
}

impl ImagenClient {
    /// Create a new Imagen client
    pub fn new(endpoint: &str, api_key: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Image client configured: endpoint={}, model={}",
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

    fn predict_url(&self) -> String {
        format!("{}/v1beta/models/{}:predict", self.endpoint, self.model_name)
    }
}

#[async_trait]
impl ImageProvider for ImagenClient {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> std::result::Result<Vec<GeneratedImage>, ProviderError> {
        let body = PredictRequest::from(request);

        let url = self.predict_url();
        debug!(
            "Image generate POST {} (n={}, aspect_ratio={})",
            url, request.number_of_images, request.aspect_ratio
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
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

        let text = response.text().await?;
        let predict_response: PredictResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        predict_response.into_images()
    }
}
