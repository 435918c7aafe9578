// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversational front end.
//!
//! Maps inbound commands, button actions and free text onto tracking
//! operations and renders the result as a `Reply`. Multi-step inputs
//! (meal name then calories, etc.) are tracked per user; a bad number keeps
//! the user on the same step with guidance instead of failing.
//!
//! Action tokens:
//! - `menu`, `workout_today`, `nutrition`, `close_day`, `stats`
//! - `ex:{date}:{day}:{i}`, `set:{date}:{day}:{i}:{j}`, `rest:{date}:{i}`
//! - `meal_add`, `protein_set`, `kcal_adjust`, `kcal_manual`,
//!   `activity_add`, `cardio_add`
//! - `meals:{target}`, `regen:{target}`

use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::{
    resolve_workout_day, short_weekday_label, Button, DayPlan, DayStatus, EventKind,
    InboundEvent, Keyboard, NutritionRecord, Reply, UserId, WorkoutDayId,
};
use crate::services::content::{ContentCatalog, ContentTarget, MealSlot, RegenOutcome};
use crate::services::day_close::CloseVerdict;
use crate::services::generator::TextGenerator;
use crate::services::nutrition::NutritionLedger;
use crate::services::progress::ProgressService;
use crate::services::stats::{render, StatsReporter};
use crate::time_utils::{format_date_key, parse_date_key, Clock};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

/// Pending multi-step input for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    MealName,
    MealKcal { name: String },
    Protein,
    KcalDelta,
    ManualTotal,
    ActivityName,
    ActivityKcal { name: String },
    CardioLabel,
}

/// Event dispatcher and reply renderer.
pub struct BotService {
    records: RecordStore,
    content: Arc<ContentCatalog>,
    progress: ProgressService,
    ledger: NutritionLedger,
    stats: StatsReporter,
    generator: Arc<dyn TextGenerator>,
    clock: Clock,
    stats_window_days: u32,
    dialogs: DashMap<UserId, Dialog>,
}

fn mark(done: bool) -> &'static str {
    if done {
        "✅"
    } else {
        "⬜"
    }
}

/// Whole kcal where possible, one decimal otherwise.
fn kcal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn back_row() -> Vec<Button> {
    vec![Button::new("⬅️ Menu", "menu")]
}

fn main_keyboard() -> Keyboard {
    vec![
        vec![Button::new("🏋️ Today's workout", "workout_today")],
        vec![Button::new("🍽 Nutrition", "nutrition")],
        vec![
            Button::new("🥣 Breakfast", "meals:breakfast"),
            Button::new("🍲 Lunch", "meals:lunch"),
            Button::new("🍝 Dinner", "meals:dinner"),
        ],
        vec![Button::new("🏃 Log cardio", "cardio_add")],
        vec![
            Button::new("✅ Close day", "close_day"),
            Button::new("📊 Stats", "stats"),
        ],
    ]
}

fn nutrition_keyboard() -> Keyboard {
    vec![
        vec![
            Button::new("➕ Meal", "meal_add"),
            Button::new("🥩 Protein", "protein_set"),
        ],
        vec![
            Button::new("± kcal", "kcal_adjust"),
            Button::new("✍️ Day total", "kcal_manual"),
        ],
        vec![Button::new("🔥 Activity", "activity_add")],
        vec![Button::new("✅ Close day", "close_day")],
        back_row(),
    ]
}

fn cancel_keyboard() -> Keyboard {
    vec![vec![Button::new("❌ Cancel", "menu")]]
}

impl BotService {
    pub fn new(
        records: RecordStore,
        content: Arc<ContentCatalog>,
        generator: Arc<dyn TextGenerator>,
        clock: Clock,
        stats_window_days: u32,
    ) -> Self {
        Self {
            progress: ProgressService::new(records.clone(), Arc::clone(&content)),
            ledger: NutritionLedger::new(records.clone()),
            stats: StatsReporter::new(records.clone(), Arc::clone(&content)),
            records,
            content,
            generator,
            clock,
            stats_window_days,
            dialogs: DashMap::new(),
        }
    }

    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    pub fn ledger(&self) -> &NutritionLedger {
        &self.ledger
    }

    pub fn stats(&self) -> &StatsReporter {
        &self.stats
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Pending input step for a user, if any.
    pub fn dialog(&self, user: UserId) -> Option<Dialog> {
        self.dialogs.get(&user).map(|entry| entry.value().clone())
    }

    /// Handle one inbound event. Every sender becomes a subscriber.
    pub async fn handle(&self, event: &InboundEvent) -> Result<Reply> {
        let user = event.user_id;
        tracing::info!(user_id = %user, kind = ?event.kind, "Handling event");

        self.records.add_subscriber(user).await?;

        match event.kind {
            EventKind::Command => {
                self.dialogs.remove(&user);
                self.handle_command(user, event.data.trim()).await
            }
            EventKind::Callback => {
                self.dialogs.remove(&user);
                self.handle_callback(user, event.data.trim()).await
            }
            EventKind::Text => self.handle_text(user, &event.data).await,
        }
    }

    async fn handle_command(&self, user: UserId, command: &str) -> Result<Reply> {
        // "/start@SomeBot extra" -> "/start"
        let name = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .split('@')
            .next()
            .unwrap_or_default();

        match name {
            "/start" => Ok(Reply::with_keyboard(
                "👋 Hi! I'll remind you about meals and workouts and help you track the day.\n\
                 Mark exercises as you go, log what you eat and close the day in the evening.",
                main_keyboard(),
            )),
            "/workout" => self.workout_view(user, self.today()).await,
            "/nutrition" => self.nutrition_view(user, self.today(), None).await,
            "/close" => self.close_day(user).await,
            "/stats" => self.stats_view(user).await,
            "/cancel" => Ok(Reply::with_keyboard("Cancelled.", main_keyboard())),
            other => {
                tracing::debug!(user_id = %user, command = other, "Unknown command");
                Ok(Reply::with_keyboard("Unknown command.", main_keyboard()))
            }
        }
    }

    async fn handle_callback(&self, user: UserId, token: &str) -> Result<Reply> {
        let parts: Vec<&str> = token.split(':').collect();

        match parts.as_slice() {
            ["menu"] => Ok(Reply::with_keyboard("Main menu", main_keyboard())),
            ["workout_today"] => self.workout_view(user, self.today()).await,
            ["ex", date, day, index] => {
                let (Some(date), Ok(day_id), Ok(index)) = (
                    parse_date_key(date),
                    day.parse::<WorkoutDayId>(),
                    index.parse::<usize>(),
                ) else {
                    return Ok(self.unknown_action(user, token));
                };
                let result = self.progress.toggle_exercise(user, date, day_id, index).await;
                self.after_toggle(user, date, result).await
            }
            ["set", date, day, exercise, set] => {
                let (Some(date), Ok(day_id), Ok(exercise), Ok(set)) = (
                    parse_date_key(date),
                    day.parse::<WorkoutDayId>(),
                    exercise.parse::<usize>(),
                    set.parse::<usize>(),
                ) else {
                    return Ok(self.unknown_action(user, token));
                };
                let result = self
                    .progress
                    .toggle_set(user, date, day_id, exercise, set)
                    .await;
                self.after_toggle(user, date, result).await
            }
            ["rest", date, index] => {
                let (Some(date), Ok(index)) = (parse_date_key(date), index.parse::<usize>())
                else {
                    return Ok(self.unknown_action(user, token));
                };
                let result = self.progress.toggle_rest_item(user, date, index).await;
                self.after_toggle(user, date, result).await
            }
            ["nutrition"] => self.nutrition_view(user, self.today(), None).await,
            ["meal_add"] => Ok(self.prompt(user, Dialog::MealName, "What did you eat?")),
            ["protein_set"] => Ok(self.prompt(
                user,
                Dialog::Protein,
                "How many grams of protein today? Send a whole number, e.g. 140.",
            )),
            ["kcal_adjust"] => Ok(self.prompt(
                user,
                Dialog::KcalDelta,
                "Send a calorie correction such as +150 or -80.",
            )),
            ["kcal_manual"] => Ok(self.prompt(
                user,
                Dialog::ManualTotal,
                "Send today's total calories. It replaces the sum of logged meals.",
            )),
            ["activity_add"] => Ok(self.prompt(
                user,
                Dialog::ActivityName,
                "What activity did you do?",
            )),
            ["cardio_add"] => Ok(self.prompt(
                user,
                Dialog::CardioLabel,
                "Describe your cardio, e.g. \"Running 5 km\".",
            )),
            ["close_day"] => self.close_day(user).await,
            ["stats"] => self.stats_view(user).await,
            ["meals", target] => match target.parse::<ContentTarget>() {
                Ok(ContentTarget::Meal(slot)) => Ok(self.meal_view(slot).await),
                Ok(ContentTarget::Workout) => self.workout_view(user, self.today()).await,
                Err(_) => Ok(self.unknown_action(user, token)),
            },
            ["regen", target] => match target.parse::<ContentTarget>() {
                Ok(target) => self.regenerate(user, target).await,
                Err(_) => Ok(self.unknown_action(user, token)),
            },
            _ => Ok(self.unknown_action(user, token)),
        }
    }

    async fn handle_text(&self, user: UserId, text: &str) -> Result<Reply> {
        let Some((_, dialog)) = self.dialogs.remove(&user) else {
            return Ok(Reply::with_keyboard(
                "I didn't catch that. Pick an option below.",
                main_keyboard(),
            ));
        };

        let text = text.trim();
        let today = self.today();

        match dialog {
            Dialog::MealName | Dialog::ActivityName | Dialog::CardioLabel if text.is_empty() => {
                Ok(self.prompt(user, dialog, "Please send a short description."))
            }
            Dialog::MealName => Ok(self.prompt(
                user,
                Dialog::MealKcal {
                    name: text.to_string(),
                },
                &format!("How many kcal in \"{}\"?", text),
            )),
            Dialog::MealKcal { name } => {
                let result = self.ledger.add_meal(user, today, &name, text).await;
                self.after_input(
                    user,
                    today,
                    result,
                    Dialog::MealKcal { name: name.clone() },
                    &format!("✅ Added {}", name),
                    "Send calories as a number, e.g. 350.",
                )
                .await
            }
            Dialog::Protein => {
                let result = self.ledger.set_protein(user, today, text).await;
                self.after_input(
                    user,
                    today,
                    result,
                    Dialog::Protein,
                    "✅ Protein saved",
                    "Send grams as a whole number, e.g. 140.",
                )
                .await
            }
            Dialog::KcalDelta => {
                let result = self.ledger.adjust_kcal(user, today, text).await;
                self.after_input(
                    user,
                    today,
                    result,
                    Dialog::KcalDelta,
                    "✅ Calories adjusted",
                    "Send a signed number, e.g. +150 or -80.",
                )
                .await
            }
            Dialog::ManualTotal => {
                let result = self.ledger.set_manual_total(user, today, text).await;
                self.after_input(
                    user,
                    today,
                    result,
                    Dialog::ManualTotal,
                    "✅ Day total saved",
                    "Send a whole number of kcal, e.g. 2100.",
                )
                .await
            }
            Dialog::ActivityName => Ok(self.prompt(
                user,
                Dialog::ActivityKcal {
                    name: text.to_string(),
                },
                &format!("How many kcal did \"{}\" burn?", text),
            )),
            Dialog::ActivityKcal { name } => {
                let result = self.ledger.add_activity(user, today, &name, text).await;
                self.after_input(
                    user,
                    today,
                    result,
                    Dialog::ActivityKcal { name: name.clone() },
                    &format!("✅ Added {}", name),
                    "Send burned calories as a number, e.g. 250.",
                )
                .await
            }
            Dialog::CardioLabel => {
                self.progress.add_activity_label(user, today, text).await?;
                Ok(Reply::with_keyboard(
                    format!("🏃 Logged cardio: {}", text),
                    main_keyboard(),
                ))
            }
        }
    }

    /// Store the next input step and ask for it.
    fn prompt(&self, user: UserId, dialog: Dialog, text: &str) -> Reply {
        self.dialogs.insert(user, dialog);
        Reply::with_keyboard(text, cancel_keyboard())
    }

    /// Render a ledger result, or re-prompt the same step on a bad number.
    async fn after_input(
        &self,
        user: UserId,
        date: NaiveDate,
        result: Result<NutritionRecord>,
        retry: Dialog,
        done_text: &str,
        guidance: &str,
    ) -> Result<Reply> {
        match result {
            Ok(record) => Ok(self.render_nutrition(date, &record, Some(done_text))),
            Err(AppError::InvalidNumber(detail)) => {
                tracing::debug!(user_id = %user, detail = %detail, "Re-prompting after bad number");
                Ok(self.prompt(user, retry, &format!("⚠️ {}. {}", detail, guidance)))
            }
            Err(e) => Err(e),
        }
    }

    async fn after_toggle(
        &self,
        user: UserId,
        date: NaiveDate,
        result: Result<bool>,
    ) -> Result<Reply> {
        match result {
            Ok(_) => self.workout_view(user, date).await,
            Err(e) if e.is_rejected_toggle() => {
                tracing::debug!(user_id = %user, error = %e, "Toggle rejected");
                Ok(Reply::with_keyboard(
                    "Nothing changed: that item is not part of this day's plan.",
                    vec![
                        vec![Button::new("🏋️ Today's workout", "workout_today")],
                        back_row(),
                    ],
                ))
            }
            Err(e) => Err(e),
        }
    }

    fn unknown_action(&self, user: UserId, token: &str) -> Reply {
        tracing::debug!(user_id = %user, token, "Unknown action token");
        Reply::with_keyboard("Unknown action.", main_keyboard())
    }

    /// Today's workout or rest checklist with toggle controls.
    pub async fn workout_view(&self, user: UserId, date: NaiveDate) -> Result<Reply> {
        let record = self.progress.day(user, date).await?;
        let key = format_date_key(date);
        let label = short_weekday_label(date);

        match resolve_workout_day(date) {
            DayPlan::Workout(id) => {
                let Some(day) = self.content.workout_day(id).await else {
                    return Ok(Reply::with_keyboard("No workout defined.", vec![back_row()]));
                };

                let mut text = format!("🏋️ {} ({} {})\n\n", day.title, label, key);
                let mut keyboard = Vec::with_capacity(day.exercises.len() + 1);

                for (i, exercise) in day.exercises.iter().enumerate() {
                    let done = record.progress.exercises.contains(&i);
                    let sets: Vec<&str> = (0..exercise.sets)
                        .map(|j| if record.progress.is_set_done(i, j) { "✅" } else { "🔲" })
                        .collect();
                    text.push_str(&format!(
                        "{} {}. {} — {}  {}\n",
                        mark(done),
                        i + 1,
                        exercise.name,
                        exercise.target,
                        sets.join(" ")
                    ));

                    let mut row = vec![Button::new(
                        format!("{} {}", mark(done), exercise.name),
                        format!("ex:{}:{}:{}", key, id, i),
                    )];
                    for j in 0..exercise.sets {
                        let set_label = if record.progress.is_set_done(i, j) {
                            "✅".to_string()
                        } else {
                            (j + 1).to_string()
                        };
                        row.push(Button::new(set_label, format!("set:{}:{}:{}:{}", key, id, i, j)));
                    }
                    keyboard.push(row);
                }

                let total = day.exercises.len();
                text.push_str(&format!(
                    "\nDone: {}/{}",
                    record.progress.exercises_done(total),
                    total
                ));
                keyboard.push(vec![
                    Button::new("🔄 New workout", "regen:workout"),
                    Button::new("⬅️ Menu", "menu"),
                ]);
                Ok(Reply::with_keyboard(text, keyboard))
            }
            DayPlan::Rest => {
                let checklist = self.content.rest_checklist().await;
                let mut text = format!("🧘 Rest day ({} {})\n\n", label, key);
                let mut keyboard = Vec::with_capacity(checklist.len() + 1);

                for (i, item) in checklist.iter().enumerate() {
                    let done = record.progress.rest_items.contains(&i);
                    text.push_str(&format!("{} {}\n", mark(done), item));
                    keyboard.push(vec![Button::new(
                        format!("{} {}", mark(done), item),
                        format!("rest:{}:{}", key, i),
                    )]);
                }

                text.push_str(&format!(
                    "\nDone: {}/{}",
                    record.progress.rest_items_done(checklist.len()),
                    checklist.len()
                ));
                keyboard.push(back_row());
                Ok(Reply::with_keyboard(text, keyboard))
            }
        }
    }

    async fn nutrition_view(
        &self,
        user: UserId,
        date: NaiveDate,
        heading: Option<&str>,
    ) -> Result<Reply> {
        let record = self.ledger.record(user, date).await?;
        Ok(self.render_nutrition(date, &record, heading))
    }

    fn render_nutrition(
        &self,
        date: NaiveDate,
        record: &NutritionRecord,
        heading: Option<&str>,
    ) -> Reply {
        let mut text = String::new();
        if let Some(heading) = heading {
            text.push_str(heading);
            text.push_str("\n\n");
        }
        text.push_str(&format!("🍽 Nutrition for {}\n\n", format_date_key(date)));

        text.push_str("Meals:\n");
        if record.meals.is_empty() {
            text.push_str("  (none yet)\n");
        }
        for meal in &record.meals {
            text.push_str(&format!("• {} — {} kcal\n", meal.name, kcal(meal.kcal)));
        }
        if record.kcal_adjustment != 0.0 {
            text.push_str(&format!("Adjustment: {:+} kcal\n", record.kcal_adjustment));
        }
        if let Some(total) = record.manual_total_kcal {
            text.push_str(&format!("Day total (manual): {} kcal\n", total));
        }
        match record.protein_grams {
            Some(grams) => text.push_str(&format!("Protein: {} g\n", grams)),
            None => text.push_str("Protein: not set\n"),
        }

        if !record.activities.is_empty() {
            text.push_str("Activities:\n");
            for activity in &record.activities {
                text.push_str(&format!(
                    "• {} — {} kcal\n",
                    activity.name,
                    kcal(activity.burned_kcal)
                ));
            }
        }

        text.push_str(&format!(
            "\nIntake: {} | Burned: {} | Net: {} kcal",
            kcal(record.intake()),
            kcal(record.burned()),
            kcal(record.net())
        ));
        match record.day_status {
            DayStatus::Ok => text.push_str("\nStatus: OK ✅"),
            DayStatus::Incomplete => text.push_str("\nStatus: INCOMPLETE ❌"),
            DayStatus::Unset => {}
        }

        Reply::with_keyboard(text, nutrition_keyboard())
    }

    async fn meal_view(&self, slot: MealSlot) -> Reply {
        let menu = self.content.menu(slot).await;
        Reply::with_keyboard(
            format!("🍽 {} menu\n\n{}", capitalize(slot.as_str()), menu),
            vec![
                vec![Button::new("🔄 New menu", format!("regen:{}", slot.as_str()))],
                vec![Button::new("➕ Log meal", "meal_add")],
                back_row(),
            ],
        )
    }

    async fn close_day(&self, user: UserId) -> Result<Reply> {
        let date = self.today();
        let verdict = self.progress.close_day(user, date).await?;
        Ok(Reply::with_keyboard(
            close_text(date, &verdict),
            vec![
                vec![
                    Button::new("🍽 Nutrition", "nutrition"),
                    Button::new("🏋️ Workout", "workout_today"),
                ],
                back_row(),
            ],
        ))
    }

    async fn stats_view(&self, user: UserId) -> Result<Reply> {
        let report = self
            .stats
            .build_report(user, self.today(), self.stats_window_days)
            .await?;
        Ok(Reply::with_keyboard(render(&report), vec![back_row()]))
    }

    async fn regenerate(&self, user: UserId, target: ContentTarget) -> Result<Reply> {
        tracing::info!(user_id = %user, content = %target, "Regenerating content");

        let outcome = self
            .content
            .regenerate(target, self.today(), self.generator.as_ref())
            .await;

        match outcome {
            Ok(RegenOutcome::MenuReplaced { slot, text }) => Ok(Reply::with_keyboard(
                format!("🔄 New {} menu:\n\n{}", slot.as_str(), text),
                vec![
                    vec![Button::new("➕ Log meal", "meal_add")],
                    back_row(),
                ],
            )),
            Ok(RegenOutcome::WorkoutReplaced(day)) => {
                let rows: Vec<String> = day
                    .exercises
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {} — {}", i + 1, e.name, e.target))
                    .collect();
                Ok(Reply::with_keyboard(
                    format!("🔄 New workout for {}:\n\n{}", day.title, rows.join("\n")),
                    vec![
                        vec![Button::new("🏋️ Today's workout", "workout_today")],
                        back_row(),
                    ],
                ))
            }
            Ok(RegenOutcome::Unparsed { day, raw }) => Ok(Reply::with_keyboard(
                format!(
                    "⚠️ Couldn't read exercises from the generated workout; \
                     keeping the current {} plan.\n\n{}",
                    day, raw
                ),
                vec![back_row()],
            )),
            Err(AppError::ExternalService(detail)) => {
                tracing::warn!(user_id = %user, content = %target, error = %detail, "Regeneration failed");
                Ok(Reply::with_keyboard(
                    format!("😔 Sorry, couldn't generate new content: {}", detail),
                    vec![back_row()],
                ))
            }
            Err(e) => Err(e),
        }
    }
}

fn close_text(date: NaiveDate, verdict: &CloseVerdict) -> String {
    if verdict.is_ok() {
        format!("✅ Day {} closed: OK. Well done!", format_date_key(date))
    } else {
        let missing: Vec<&str> = verdict.missing.iter().map(|m| m.as_str()).collect();
        format!(
            "❌ Day {} closed: INCOMPLETE.\nMissing: {}",
            format_date_key(date),
            missing.join(", ")
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::day_close::MissingCategory;
    use crate::services::generator::DisabledGenerator;

    fn bot(date: NaiveDate) -> BotService {
        BotService::new(
            RecordStore::in_memory(),
            Arc::new(ContentCatalog::new()),
            Arc::new(DisabledGenerator),
            Clock::Fixed(date),
            14,
        )
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_kcal_formatting() {
        assert_eq!(kcal(300.0), "300");
        assert_eq!(kcal(250.5), "250.5");
        assert_eq!(kcal(-50.0), "-50");
    }

    #[test]
    fn test_close_text() {
        let verdict = CloseVerdict {
            status: DayStatus::Incomplete,
            missing: vec![MissingCategory::Protein, MissingCategory::Workout],
        };
        assert_eq!(
            close_text(monday(), &verdict),
            "❌ Day 2024-01-01 closed: INCOMPLETE.\nMissing: protein, workout"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("breakfast"), "Breakfast");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_command_with_bot_suffix() {
        let bot = bot(monday());
        let reply = bot
            .handle(&InboundEvent::command(UserId(1), "/start@SmartDailyBot"))
            .await
            .unwrap();
        assert!(reply.text.starts_with("👋"));
    }

    #[tokio::test]
    async fn test_callback_clears_pending_dialog() {
        let bot = bot(monday());
        let user = UserId(1);
        bot.handle(&InboundEvent::callback(user, "meal_add"))
            .await
            .unwrap();
        assert_eq!(bot.dialog(user), Some(Dialog::MealName));

        bot.handle(&InboundEvent::callback(user, "stats"))
            .await
            .unwrap();
        assert_eq!(bot.dialog(user), None);
    }

    #[tokio::test]
    async fn test_workout_view_buttons_embed_date_and_day() {
        let bot = bot(monday());
        let reply = bot.workout_view(UserId(1), monday()).await.unwrap();

        let actions = reply.actions();
        assert_eq!(actions[0], "ex:2024-01-01:monday:0");
        assert_eq!(actions[1], "set:2024-01-01:monday:0:0");
        assert!(actions.contains(&"regen:workout"));
        assert!(reply.text.contains("Done: 0/7"));
    }
}
