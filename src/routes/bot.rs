// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inbound bot events.
//!
//! The chat platform (or a relay in front of it) posts normalized events to
//! `/bot/{secret}/events` and gets the reply to render back in the body.

use crate::error::AppError;
use crate::models::{InboundEvent, Reply};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    routing::post,
    Router,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Bot routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/bot/{secret}/events", post(handle_event))
}

fn secret_matches(received: &str, expected: &str) -> bool {
    received.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Handle one inbound event (POST).
async fn handle_event(
    State(state): State<Arc<AppState>>,
    Path(secret): Path<String>,
    Json(event): Json<InboundEvent>,
) -> Result<Json<Reply>, AppError> {
    if !secret_matches(&secret, &state.config.webhook_secret) {
        tracing::warn!(
            user_id = %event.user_id,
            "Security Alert: Bot path secret mismatch"
        );
        return Err(AppError::NotFound("Unknown endpoint".to_string()));
    }

    let reply = state.bot.handle(&event).await?;
    Ok(Json(reply))
}
