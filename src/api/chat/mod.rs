// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Deck consultant chat endpoint module
//!
//! Provides POST /api/chat.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{chat_handler, SYSTEM_PROMPT};
pub use request::ChatRequest;
pub use response::ChatReply;
