// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod bot;
pub mod content;
pub mod day_close;
pub mod generator;
pub mod messenger;
pub mod nutrition;
pub mod progress;
pub mod reminder;
pub mod stats;

pub use bot::{BotService, Dialog};
pub use content::{ContentCatalog, ContentTarget, MealSlot, RegenOutcome};
pub use day_close::{CloseVerdict, MissingCategory};
pub use generator::{DisabledGenerator, OpenAiGenerator, TextGenerator};
pub use messenger::{BotApiSender, MessageSender};
pub use nutrition::NutritionLedger;
pub use progress::ProgressService;
pub use reminder::{BroadcastResult, ReminderKind, ReminderService};
pub use stats::{StatsReport, StatsReporter, StatsSummary};
