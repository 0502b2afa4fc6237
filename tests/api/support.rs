// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fake providers and request helpers shared by the API tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use deck_relay::{
    api::{create_app, AppState},
    ChatProvider, GeneratedImage, ImageGenerationRequest, ImageProvider, ProviderError,
};
use serde_json::Value;
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tower::util::ServiceExt;

/// Chat provider that records every conversation it receives
pub struct FakeChatProvider {
    outcome: Result<String, (u16, String)>,
    pub calls: Mutex<Vec<(Vec<Value>, u32)>>,
}

impl FakeChatProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err((status, message.to_string())),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn last_call(&self) -> (Vec<Value>, u32) {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("chat provider was not called")
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for FakeChatProvider {
    async fn complete(&self, messages: &[Value], max_tokens: u32) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), max_tokens));
        match &self.outcome {
            Ok(reply) => Ok(reply.clone()),
            Err((status, message)) => Err(ProviderError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Image provider that records every request it receives
pub struct FakeImageProvider {
    outcome: Result<Vec<Vec<u8>>, String>,
    pub calls: Mutex<Vec<ImageGenerationRequest>>,
}

impl FakeImageProvider {
    pub fn returning(images: Vec<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(images),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn last_call(&self) -> ImageGenerationRequest {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("image provider was not called")
    }
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<Vec<GeneratedImage>, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.outcome {
            Ok(images) => Ok(images
                .iter()
                .map(|bytes| GeneratedImage {
                    bytes: bytes.clone(),
                    mime_type: Some("image/png".to_string()),
                })
                .collect()),
            Err(message) => Err(ProviderError::MalformedResponse(message.clone())),
        }
    }
}

pub fn app_with(
    chat: Arc<FakeChatProvider>,
    images: Arc<FakeImageProvider>,
    static_dir: &Path,
) -> Router {
    let state = AppState::new(chat, images).with_static_dir(static_dir);
    create_app(Arc::new(state))
}

pub fn default_app(chat: Arc<FakeChatProvider>, images: Arc<FakeImageProvider>) -> Router {
    app_with(chat, images, Path::new("static"))
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
