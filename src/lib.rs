// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Smart daily bot: workout, nutrition and reminder tracking over chat.
//!
//! This crate provides the event endpoint, the tracking services behind it
//! and the scheduled reminders pushed to subscribers.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RecordStore;
use services::{BotService, ContentCatalog, MessageSender, ReminderService, TextGenerator};
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub records: RecordStore,
    pub content: Arc<ContentCatalog>,
    pub bot: BotService,
    pub reminders: Arc<ReminderService>,
}

impl AppState {
    /// Wire services around a store, a generator and an outbound sender.
    pub fn new(
        config: Config,
        records: RecordStore,
        generator: Arc<dyn TextGenerator>,
        sender: Arc<dyn MessageSender>,
        clock: Clock,
    ) -> Self {
        let content = Arc::new(ContentCatalog::new());
        let bot = BotService::new(
            records.clone(),
            Arc::clone(&content),
            generator,
            clock,
            config.stats_window_days,
        );
        let reminders = Arc::new(ReminderService::new(
            records.clone(),
            Arc::clone(&content),
            sender,
            config.utc_offset,
        ));

        Self {
            config,
            records,
            content,
            bot,
            reminders,
        }
    }
}
