// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod chat;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod visualize;

pub use chat::{chat_handler, ChatReply, ChatRequest};
pub use errors::{ApiError, ErrorResponse, IMAGE_GENERATION_FAILED};
pub use handlers::HealthResponse;
pub use http_server::{create_app, start_server, AppState};
pub use visualize::{visualize_handler, ImageReply, ImageRequest};
