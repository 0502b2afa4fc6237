// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Visualization request types and prompt enhancement

use serde::{Deserialize, Serialize};

/// Request for POST /api/visualize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Free-text description of the deck
    pub prompt: String,
}

impl ImageRequest {
    /// Wrap the raw prompt in the architectural render template.
    ///
    /// The prompt is embedded as-is, with no escaping or truncation.
    pub fn enhanced_prompt(&self) -> String {
        format!(
            "Photorealistic architectural render of a residential deck: {}. \
             Sunny day, suburban backyard, 8k resolution, highly detailed materials.",
            self.prompt
        )
    }
}
