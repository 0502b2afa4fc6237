// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use deck_relay::{start_server, RelayConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Load API keys from .env if present
    dotenv::dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = RelayConfig::parse();

    tracing::info!("Starting deck relay {}", deck_relay::version::VERSION);
    tracing::info!("Static dir: {}", config.static_dir.display());

    let addr = config.listen_addr()?;
    let state = config.build_state()?;

    start_server(state, addr).await
}
