// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end relay tests: real provider clients against stub provider APIs

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use deck_relay::{
    api::{create_app, AppState},
    providers::{ImagenClient, OpenAiChatClient},
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tower::util::ServiceExt;

use super::stub_server::StubServer;

fn relay_state(chat: &StubServer, images: &StubServer) -> AppState {
    let chat_client =
        OpenAiChatClient::new(&chat.base_url, "sk-test", "gpt-4o", Duration::from_secs(5)).unwrap();
    let image_client = ImagenClient::new(
        &images.base_url,
        "g-test",
        "imagen-3.0-generate-001",
        Duration::from_secs(5),
    )
    .unwrap();
    AppState::new(Arc::new(chat_client), Arc::new(image_client))
}

async fn post(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = create_app(Arc::new(state)).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_chat_round_trip() {
    let chat = StubServer::start(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "What is your budget?"}}]})
            .to_string(),
    )
    .await;
    let images = StubServer::start(StatusCode::OK, "{}").await;

    let (status, body) = post(
        relay_state(&chat, &images),
        "/api/chat",
        json!({"message": "16x20 deck", "history": [{"role": "assistant", "content": "Hi!"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reply": "What is your budget?"}));

    let sent = chat.single_request();
    let messages = sent.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1], json!({"role": "assistant", "content": "Hi!"}));
    assert_eq!(messages[2], json!({"role": "user", "content": "16x20 deck"}));
    assert_eq!(sent.body["max_tokens"], 200);
    assert!(images.requests().is_empty());
}

#[tokio::test]
async fn test_chat_provider_failure_detail_passed_through() {
    let chat = StubServer::start(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Rate limit reached for gpt-4o"}}).to_string(),
    )
    .await;
    let images = StubServer::start(StatusCode::OK, "{}").await;

    let (status, body) = post(
        relay_state(&chat, &images),
        "/api/chat",
        json!({"message": "hello"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "provider returned 429: Rate limit reached for gpt-4o"})
    );
}

#[tokio::test]
async fn test_visualize_round_trip() {
    let jpeg: Vec<u8> = vec![0xff, 0xd8, 0xff, 0xe1, 0x12, 0x34];
    let chat = StubServer::start(StatusCode::OK, "{}").await;
    let images = StubServer::start(
        StatusCode::OK,
        json!({"predictions": [{"bytesBase64Encoded": STANDARD.encode(&jpeg), "mimeType": "image/png"}]})
            .to_string(),
    )
    .await;

    let (status, body) = post(
        relay_state(&chat, &images),
        "/api/visualize",
        json!({"prompt": "wraparound deck with pergola"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["image_data"],
        format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg))
    );

    let sent = images.single_request();
    let prompt = sent.body["instances"][0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("wraparound deck with pergola"));
    assert_eq!(sent.body["parameters"]["sampleCount"], 1);
    assert_eq!(sent.body["parameters"]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn test_visualize_provider_failure_detail_hidden() {
    let chat = StubServer::start(StatusCode::OK, "{}").await;
    let images = StubServer::start(
        StatusCode::FORBIDDEN,
        json!({"error": {"message": "Imagen API is only accessible to billed users"}}).to_string(),
    )
    .await;

    let (status, body) = post(
        relay_state(&chat, &images),
        "/api/visualize",
        json!({"prompt": "deck"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Image generation failed"}));
}
