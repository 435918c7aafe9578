// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily reminder scheduling and broadcast.
//!
//! Each reminder runs in its own task that sleeps until the next wall-clock
//! fire time in the configured offset. A fire missed while the process was
//! down is not replayed. Broadcasts fan out to all subscribers with bounded
//! concurrency; one failed send never stops the others.

use crate::config::ReminderTimes;
use crate::db::RecordStore;
use crate::error::Result;
use crate::models::{resolve_workout_day, Button, DayPlan, Reply, UserId};
use crate::services::content::{ContentCatalog, MealSlot};
use crate::services::messenger::MessageSender;
use crate::time_utils::next_fire;
use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use tokio::task::JoinHandle;

const MAX_CONCURRENT_SENDS: usize = 20;

/// Kinds of daily reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Breakfast,
    Lunch,
    Dinner,
    Workout,
    NutritionLog,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 5] = [
        ReminderKind::Breakfast,
        ReminderKind::Lunch,
        ReminderKind::Dinner,
        ReminderKind::Workout,
        ReminderKind::NutritionLog,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Breakfast => "breakfast",
            ReminderKind::Lunch => "lunch",
            ReminderKind::Dinner => "dinner",
            ReminderKind::Workout => "workout",
            ReminderKind::NutritionLog => "nutrition_log",
        }
    }

    pub fn time(&self, times: &ReminderTimes) -> NaiveTime {
        match self {
            ReminderKind::Breakfast => times.breakfast,
            ReminderKind::Lunch => times.lunch,
            ReminderKind::Dinner => times.dinner,
            ReminderKind::Workout => times.workout,
            ReminderKind::NutritionLog => times.nutrition_log,
        }
    }
}

/// Outcome of sending one message to every subscriber.
#[derive(Debug, Clone, Default)]
pub struct BroadcastResult {
    pub sent: u32,
    pub failed: u32,
    pub failed_users: Vec<UserId>,
}

impl BroadcastResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }

    pub fn is_partial_failure(&self) -> bool {
        self.sent > 0 && self.failed > 0
    }
}

/// Builds reminder content and delivers it to subscribers.
#[derive(Clone)]
pub struct ReminderService {
    records: RecordStore,
    content: Arc<ContentCatalog>,
    sender: Arc<dyn MessageSender>,
    offset: FixedOffset,
}

impl ReminderService {
    pub fn new(
        records: RecordStore,
        content: Arc<ContentCatalog>,
        sender: Arc<dyn MessageSender>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            records,
            content,
            sender,
            offset,
        }
    }

    /// Message for a reminder on a given local date.
    pub async fn message(&self, kind: ReminderKind, date: NaiveDate) -> Reply {
        match kind {
            ReminderKind::Breakfast => self.meal_message(MealSlot::Breakfast, "🥣 Breakfast time!").await,
            ReminderKind::Lunch => self.meal_message(MealSlot::Lunch, "🍲 Lunch time!").await,
            ReminderKind::Dinner => self.meal_message(MealSlot::Dinner, "🍝 Dinner time!").await,
            ReminderKind::Workout => {
                let text = match resolve_workout_day(date) {
                    DayPlan::Workout(id) => match self.content.workout_day(id).await {
                        Some(day) => {
                            let rows: Vec<String> = day
                                .exercises
                                .iter()
                                .enumerate()
                                .map(|(i, e)| format!("{}. {} — {}", i + 1, e.name, e.target))
                                .collect();
                            format!("🏋️ Workout today: {}\n\n{}", day.title, rows.join("\n"))
                        }
                        None => "🏋️ Workout today!".to_string(),
                    },
                    DayPlan::Rest => {
                        let items: Vec<String> = self
                            .content
                            .rest_checklist()
                            .await
                            .iter()
                            .map(|item| format!("• {}", item))
                            .collect();
                        format!("🧘 Rest day. Today's checklist:\n\n{}", items.join("\n"))
                    }
                };
                Reply::with_keyboard(
                    text,
                    vec![vec![Button::new("✅ Open checklist", "workout_today")]],
                )
            }
            ReminderKind::NutritionLog => Reply::with_keyboard(
                "📝 Time to log today's nutrition: meals, protein and activity. \
                 Then close the day.",
                vec![
                    vec![Button::new("🍽 Nutrition", "nutrition")],
                    vec![Button::new("✅ Close day", "close_day")],
                ],
            ),
        }
    }

    async fn meal_message(&self, slot: MealSlot, heading: &str) -> Reply {
        let menu = self.content.menu(slot).await;
        Reply::with_keyboard(
            format!("{}\n\n{}", heading, menu),
            vec![
                vec![Button::new("➕ Log meal", "meal_add")],
                vec![Button::new("🔄 New menu", format!("regen:{}", slot.as_str()))],
            ],
        )
    }

    /// Send `reply` to every subscriber.
    pub async fn broadcast(&self, reply: &Reply) -> Result<BroadcastResult> {
        let users = self.records.subscribers().await?;
        let count = users.len();

        let outcomes: Vec<(UserId, bool)> = stream::iter(users)
            .map(|user| async move {
                match self.sender.send(user, reply).await {
                    Ok(()) => (user, true),
                    Err(e) => {
                        tracing::warn!(user_id = %user, error = %e, "Reminder send failed");
                        (user, false)
                    }
                }
            })
            .buffer_unordered(MAX_CONCURRENT_SENDS)
            .collect()
            .await;

        let mut result = BroadcastResult::default();
        for (user, ok) in outcomes {
            if ok {
                result.sent += 1;
            } else {
                result.failed += 1;
                result.failed_users.push(user);
            }
        }
        result.failed_users.sort();

        tracing::info!(
            requested = count,
            sent = result.sent,
            failed = result.failed,
            "Broadcast finished"
        );
        Ok(result)
    }

    /// Build and broadcast one reminder.
    pub async fn fire(&self, kind: ReminderKind, date: NaiveDate) -> Result<BroadcastResult> {
        tracing::info!(reminder = kind.as_str(), %date, "Firing reminder");
        let reply = self.message(kind, date).await;
        self.broadcast(&reply).await
    }

    /// Spawn one scheduling loop per reminder kind.
    pub fn spawn_all(self: Arc<Self>, times: ReminderTimes) -> Vec<JoinHandle<()>> {
        ReminderKind::ALL
            .iter()
            .map(|kind| {
                let service = Arc::clone(&self);
                let kind = *kind;
                let at = kind.time(&times);
                tokio::spawn(async move { service.run(kind, at).await })
            })
            .collect()
    }

    async fn run(&self, kind: ReminderKind, at: NaiveTime) {
        loop {
            let now = Utc::now();
            let fire_at = next_fire(now, at, self.offset);
            tracing::debug!(reminder = kind.as_str(), fire_at = %fire_at, "Next reminder scheduled");

            let wait = (fire_at - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            let date = fire_at.with_timezone(&self.offset).date_naive();
            if let Err(e) = self.fire(kind, date).await {
                tracing::error!(reminder = kind.as_str(), error = %e, "Reminder broadcast failed");
            }
        }
    }
}
