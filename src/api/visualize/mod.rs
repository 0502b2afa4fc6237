// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deck visualization endpoint module
//!
//! Provides POST /api/visualize for rendering a deck from a text description.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{visualize_handler, IMAGE_ASPECT_RATIO};
pub use request::ImageRequest;
pub use response::ImageReply;
