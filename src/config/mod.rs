// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process configuration, read once at startup from flags or environment

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};
use url::Url;

use crate::api::http_server::{AppState, DEFAULT_CHAT_MAX_TOKENS};
use crate::providers::{ImagenClient, OpenAiChatClient};

/// Deck relay server
#[derive(Parser, Debug, Clone)]
#[command(name = "deck-relay")]
#[command(version)]
#[command(about = "Relays deck chat and visualization requests to AI providers", long_about = None)]
pub struct RelayConfig {
    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Directory containing the prebuilt frontend
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// API key for the chat provider
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub openai_api_key: String,

    /// Base URL of the OpenAI-compatible chat API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: String,

    /// Chat model name
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o")]
    pub chat_model: String,

    /// Output token bound for chat replies
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value_t = DEFAULT_CHAT_MAX_TOKENS)]
    pub chat_max_tokens: u32,

    /// API key for the image provider
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub google_api_key: String,

    /// Base URL of the Generative Language API
    #[arg(
        long,
        env = "GOOGLE_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub google_base_url: String,

    /// Imagen model name
    #[arg(long, env = "IMAGE_MODEL", default_value = "imagen-3.0-generate-001")]
    pub image_model: String,

    /// Overall timeout for a single provider call, in seconds
    #[arg(
        long,
        env = "PROVIDER_TIMEOUT_SECS",
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub provider_timeout_secs: u64,

    /// Comma-separated list of allowed CORS origins (empty allows any)
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .with_context(|| format!("invalid listen address '{}'", self.listen_addr))
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Parse the configured CORS origins, ignoring blank entries
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>> {
        self.cors_allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| anyhow!("invalid CORS origin '{}'", o))
            })
            .collect()
    }

    /// Build the provider clients and router state from this configuration.
    ///
    /// Missing credentials are only warned about; calls will then fail at
    /// the provider.
    pub fn build_state(&self) -> Result<AppState> {
        if self.openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set; chat requests will fail");
        }
        if self.google_api_key.is_empty() {
            warn!("GOOGLE_API_KEY is not set; visualize requests will fail");
        }

        let openai_base_url = validate_base_url(&self.openai_base_url)?;
        let google_base_url = validate_base_url(&self.google_base_url)?;

        let chat_client = OpenAiChatClient::new(
            &openai_base_url,
            &self.openai_api_key,
            &self.chat_model,
            self.provider_timeout(),
        )?;
        let image_client = ImagenClient::new(
            &google_base_url,
            &self.google_api_key,
            &self.image_model,
            self.provider_timeout(),
        )?;
        info!(
            "Providers ready: chat model={}, image model={}",
            chat_client.model_name(),
            image_client.model_name()
        );

        Ok(AppState::new(Arc::new(chat_client), Arc::new(image_client))
            .with_chat_max_tokens(self.chat_max_tokens)
            .with_static_dir(self.static_dir.clone())
            .with_cors_allowed_origins(self.cors_origins()?))
    }
}

fn validate_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("invalid provider URL '{}'", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("provider URL '{}' must use http or https", raw));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
