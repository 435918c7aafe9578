// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::NaiveDate;
use smart_daily_bot::config::Config;
use smart_daily_bot::db::RecordStore;
use smart_daily_bot::error::{AppError, Result};
use smart_daily_bot::models::{Reply, UserId};
use smart_daily_bot::routes::create_router;
use smart_daily_bot::services::{MessageSender, TextGenerator};
use smart_daily_bot::time_utils::Clock;
use smart_daily_bot::AppState;
use std::sync::{Arc, Mutex};

/// Generator returning canned text, or failing when none is set.
#[derive(Default)]
pub struct FakeGenerator {
    pub response: Option<String>,
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.response
            .clone()
            .ok_or_else(|| AppError::ExternalService("generator offline".to_string()))
    }
}

/// Sender that records deliveries and fails for selected users.
#[derive(Default)]
pub struct RecordingSender {
    pub fail_for: Vec<UserId>,
    pub sent: Mutex<Vec<(UserId, Reply)>>,
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, user: UserId, reply: &Reply) -> Result<()> {
        if self.fail_for.contains(&user) {
            return Err(AppError::SendFailure("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((user, reply.clone()));
        Ok(())
    }
}

/// 2024-01-01, a Monday.
#[allow(dead_code)]
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 2024-01-07, a Sunday.
#[allow(dead_code)]
pub fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
}

/// Build state pinned to `today` with the given fakes.
#[allow(dead_code)]
pub fn create_test_state(
    today: NaiveDate,
    generator: FakeGenerator,
    sender: Arc<RecordingSender>,
) -> Arc<AppState> {
    Arc::new(AppState::new(
        Config::test_default(),
        RecordStore::in_memory(),
        Arc::new(generator),
        sender,
        Clock::Fixed(today),
    ))
}

/// Create a test app with offline fakes.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(today: NaiveDate) -> (axum::Router, Arc<AppState>) {
    let state = create_test_state(
        today,
        FakeGenerator::default(),
        Arc::new(RecordingSender::default()),
    );
    (create_router(state.clone()), state)
}
