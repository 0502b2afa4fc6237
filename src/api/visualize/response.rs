// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Response from POST /api/visualize
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageReply {
    /// JPEG data URI
    pub image_data: String,
}

impl ImageReply {
    pub fn from_jpeg_bytes(bytes: &[u8]) -> Self {
        Self {
            image_data: format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)),
        }
    }
}
