// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::chat::chat_handler;
use super::handlers::health_handler;
use super::visualize::visualize_handler;
use crate::providers::{ChatProvider, ImageProvider};

/// Default output bound for chat replies
pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 200;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub chat_provider: Arc<dyn ChatProvider>,
    pub image_provider: Arc<dyn ImageProvider>,
    pub chat_max_tokens: u32,
    /// Directory holding the prebuilt frontend
    pub static_dir: PathBuf,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<HeaderValue>,
}

impl AppState {
    pub fn new(chat_provider: Arc<dyn ChatProvider>, image_provider: Arc<dyn ImageProvider>) -> Self {
        Self {
            chat_provider,
            image_provider,
            chat_max_tokens: DEFAULT_CHAT_MAX_TOKENS,
            static_dir: PathBuf::from("static"),
            cors_allowed_origins: Vec::new(),
        }
    }

    pub fn with_chat_max_tokens(mut self, max_tokens: u32) -> Self {
        self.chat_max_tokens = max_tokens;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_cors_allowed_origins(mut self, origins: Vec<HeaderValue>) -> Self {
        self.cors_allowed_origins = origins;
        self
    }
}

fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    if origins.is_empty() {
        // Any origin, method and header; restrict via CORS_ALLOWED_ORIGINS in production.
        return CorsLayer::very_permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the relay router: API routes, then the frontend for everything else.
///
/// Unmatched paths that are not files in the static directory are answered
/// with its `index.html` so client-side routes resolve.
pub fn create_app(state: Arc<AppState>) -> Router {
    let index = state.static_dir.join("index.html");
    let frontend = ServeDir::new(&state.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/visualize", post(visualize_handler))
        .fallback_service(frontend)
        .layer(cors_layer(&state.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    if !state.static_dir.join("index.html").is_file() {
        warn!(
            "No index.html in static directory {}; frontend requests will return 404",
            state.static_dir.display()
        );
    }
    if state.cors_allowed_origins.is_empty() {
        warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS before production use");
    }

    let app = create_app(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
