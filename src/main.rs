// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Smart Daily Bot Server
//!
//! Serves the bot event endpoint and runs the daily reminder schedule.

use smart_daily_bot::{
    config::Config, db::RecordStore, services::generator, services::BotApiSender,
    time_utils::Clock, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment; a missing credential is fatal
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    tracing::info!(
        port = config.port,
        utc_offset = %config.utc_offset,
        "Starting Smart Daily Bot"
    );

    let generator = generator::from_config(&config)?;

    let sender = Arc::new(BotApiSender::from_config(&config)?);
    let records = RecordStore::in_memory();
    tracing::info!("In-memory record store initialized");

    let clock = Clock::Offset(config.utc_offset);
    let state = Arc::new(AppState::new(
        config.clone(),
        records,
        generator,
        sender,
        clock,
    ));

    // Start reminder schedule
    let handles = Arc::clone(&state.reminders).spawn_all(config.reminders);
    tracing::info!(count = handles.len(), "Reminder schedule started");

    // Build router
    let app = smart_daily_bot::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("smart_daily_bot=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
