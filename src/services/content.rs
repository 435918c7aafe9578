// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout definitions, rest checklist and meal menus.
//!
//! Content starts from the built-in defaults and can be replaced by
//! generated text. A failed or unreadable generation never touches the
//! current content.

use crate::error::{AppError, Result};
use crate::models::schedule::{
    default_rest_checklist, default_workout_days, next_workout_day, Exercise, WorkoutDay,
    WorkoutDayId,
};
use crate::services::generator::TextGenerator;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use tokio::sync::RwLock;

/// Upper bound on parsed sets per exercise.
const MAX_SETS: usize = 10;
/// Sets assumed when the target has no leading count.
const DEFAULT_SETS: usize = 3;

/// Meal slot with its own menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    fn prompt(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => {
                "Suggest a healthy high-protein breakfast menu for today: 2-3 options, \
                 each with approximate kcal and protein. Plain text, one option per line."
            }
            MealSlot::Lunch => {
                "Suggest a balanced lunch menu for today: 2-3 options, each with \
                 approximate kcal and protein. Plain text, one option per line."
            }
            MealSlot::Dinner => {
                "Suggest a light high-protein dinner menu for today: 2-3 options, each \
                 with approximate kcal and protein. Plain text, one option per line."
            }
        }
    }
}

/// What a regeneration request replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTarget {
    Meal(MealSlot),
    Workout,
}

impl ContentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTarget::Meal(slot) => slot.as_str(),
            ContentTarget::Workout => "workout",
        }
    }
}

impl fmt::Display for ContentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(ContentTarget::Meal(MealSlot::Breakfast)),
            "lunch" => Ok(ContentTarget::Meal(MealSlot::Lunch)),
            "dinner" => Ok(ContentTarget::Meal(MealSlot::Dinner)),
            "workout" => Ok(ContentTarget::Workout),
            other => Err(format!("unknown content target: {}", other)),
        }
    }
}

/// Result of a successful generator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenOutcome {
    /// A meal menu was replaced with this text.
    MenuReplaced { slot: MealSlot, text: String },
    /// A workout day was replaced.
    WorkoutReplaced(WorkoutDay),
    /// Generated text had no readable exercise rows; content kept as is.
    Unparsed { day: WorkoutDayId, raw: String },
}

#[derive(Debug, Clone)]
struct Content {
    workout_days: Vec<WorkoutDay>,
    rest_checklist: Vec<String>,
    breakfast: String,
    lunch: String,
    dinner: String,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            workout_days: default_workout_days(),
            rest_checklist: default_rest_checklist(),
            breakfast: "Oatmeal with berries and whey (~450 kcal, 35 g protein)\n\
                        Scrambled eggs with wholegrain toast (~500 kcal, 30 g protein)"
                .to_string(),
            lunch: "Chicken breast with buckwheat and salad (~650 kcal, 50 g protein)\n\
                    Tuna pasta with vegetables (~600 kcal, 40 g protein)"
                .to_string(),
            dinner: "Baked salmon with vegetables (~500 kcal, 40 g protein)\n\
                     Cottage cheese with nuts (~350 kcal, 30 g protein)"
                .to_string(),
        }
    }
}

/// Current bot content, shared by every handler.
#[derive(Default)]
pub struct ContentCatalog {
    inner: RwLock<Content>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn workout_day(&self, id: WorkoutDayId) -> Option<WorkoutDay> {
        self.inner
            .read()
            .await
            .workout_days
            .iter()
            .find(|day| day.id == id)
            .cloned()
    }

    pub async fn rest_checklist(&self) -> Vec<String> {
        self.inner.read().await.rest_checklist.clone()
    }

    pub async fn menu(&self, slot: MealSlot) -> String {
        let content = self.inner.read().await;
        match slot {
            MealSlot::Breakfast => content.breakfast.clone(),
            MealSlot::Lunch => content.lunch.clone(),
            MealSlot::Dinner => content.dinner.clone(),
        }
    }

    /// Replace a workout day definition.
    pub async fn replace_workout_day(&self, day: WorkoutDay) {
        let mut content = self.inner.write().await;
        match content.workout_days.iter_mut().find(|d| d.id == day.id) {
            Some(existing) => *existing = day,
            None => content.workout_days.push(day),
        }
    }

    /// Ask the generator for new content and swap it in.
    ///
    /// The workout target refreshes the workout day for `today`, or the next
    /// scheduled one on a rest day. No lock is held while the generator runs.
    pub async fn regenerate(
        &self,
        target: ContentTarget,
        today: NaiveDate,
        generator: &dyn TextGenerator,
    ) -> Result<RegenOutcome> {
        match target {
            ContentTarget::Meal(slot) => {
                let text = generator.generate_text(slot.prompt()).await?;
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(AppError::ExternalService(
                        "generated menu was empty".to_string(),
                    ));
                }

                let mut content = self.inner.write().await;
                match slot {
                    MealSlot::Breakfast => content.breakfast = text.clone(),
                    MealSlot::Lunch => content.lunch = text.clone(),
                    MealSlot::Dinner => content.dinner = text.clone(),
                }
                tracing::info!(slot = slot.as_str(), "Meal menu regenerated");
                Ok(RegenOutcome::MenuReplaced { slot, text })
            }
            ContentTarget::Workout => {
                let id = next_workout_day(today);
                let title = match self.workout_day(id).await {
                    Some(day) => day.title,
                    None => id.as_str().to_string(),
                };

                let prompt = format!(
                    "Create a gym workout for '{}': exactly 7 exercises, one per line, \
                     formatted as 'Exercise name - SETSxREPS'. No other text.",
                    title
                );
                let raw = generator.generate_text(&prompt).await?;

                let exercises = parse_exercises(&raw);
                if exercises.is_empty() {
                    tracing::warn!(day = %id, "Generated workout could not be parsed");
                    return Ok(RegenOutcome::Unparsed { day: id, raw });
                }

                let day = WorkoutDay {
                    id,
                    title,
                    exercises,
                };
                self.replace_workout_day(day.clone()).await;
                tracing::info!(
                    day = %id,
                    exercises = day.exercises.len(),
                    "Workout regenerated"
                );
                Ok(RegenOutcome::WorkoutReplaced(day))
            }
        }
    }
}

/// Best-effort parse of generated workout text into exercise rows.
///
/// Accepts lines like `1. Squat - 4x8`, `- Plank: 3x60s` or `• Dips – 3x10`.
/// Lines without a recognisable `SETSxREPS` target are skipped.
pub fn parse_exercises(raw: &str) -> Vec<Exercise> {
    raw.lines().filter_map(parse_exercise_line).collect()
}

fn parse_exercise_line(line: &str) -> Option<Exercise> {
    let line = strip_list_marker(line.trim());
    if line.is_empty() {
        return None;
    }

    let (name, target) = [" - ", " – ", " — ", ": "]
        .iter()
        .find_map(|sep| line.rsplit_once(sep))?;
    let name = name.trim().trim_matches('*').trim();
    let target = target.trim().trim_matches('*').trim();

    if name.is_empty() || !target.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    Some(Exercise {
        name: name.to_string(),
        target: target.to_string(),
        sets: parse_set_count(target),
    })
}

/// Strip bullets (`-`, `*`, `•`) and numbering (`1.`, `2)`).
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return stripped.trim_start();
        }
    }
    line
}

/// Leading set count of a target such as `4x10`; defaults when absent.
fn parse_set_count(target: &str) -> usize {
    let digits: String = target.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &target[digits.len()..];
    let has_times = rest.starts_with(['x', 'X', '×', 'х']);

    match digits.parse::<usize>() {
        Ok(n) if has_times && n > 0 => n.min(MAX_SETS),
        _ => DEFAULT_SETS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: Mutex<Option<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(reply: Result<String>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(AppError::ExternalService("exhausted".to_string())))
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_exercises_common_formats() {
        let raw = "Here is your workout:\n\
                   1. Squat - 4x8\n\
                   2) Push-ups – 3x15\n\
                   - Plank: 3x60s\n\
                   • **Face pull** - 3x12\n\
                   Cool down and stretch";
        let parsed = parse_exercises(raw);

        let names: Vec<_> = parsed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Squat", "Push-ups", "Plank", "Face pull"]);
        assert_eq!(parsed[0].sets, 4);
        assert_eq!(parsed[0].target, "4x8");
        assert_eq!(parsed[2].sets, 3);
    }

    #[test]
    fn test_parse_set_count_defaults_and_caps() {
        assert_eq!(parse_set_count("5x5"), 5);
        assert_eq!(parse_set_count("60s"), DEFAULT_SETS);
        assert_eq!(parse_set_count("40x2"), MAX_SETS);
        assert_eq!(parse_set_count("0x10"), DEFAULT_SETS);
    }

    #[test]
    fn test_parse_exercises_rejects_free_text() {
        assert!(parse_exercises("Just do some cardio today!\nHave fun").is_empty());
    }

    #[test]
    fn test_content_target_parse() {
        assert_eq!(
            "lunch".parse::<ContentTarget>(),
            Ok(ContentTarget::Meal(MealSlot::Lunch))
        );
        assert_eq!("workout".parse::<ContentTarget>(), Ok(ContentTarget::Workout));
        assert!("snack".parse::<ContentTarget>().is_err());
    }

    #[tokio::test]
    async fn test_regenerate_meal_replaces_menu() {
        let catalog = ContentCatalog::new();
        let generator = ScriptedGenerator::new(Ok("Greek yogurt bowl".to_string()));

        let outcome = catalog
            .regenerate(ContentTarget::Meal(MealSlot::Lunch), monday(), &generator)
            .await
            .unwrap();

        assert!(matches!(outcome, RegenOutcome::MenuReplaced { slot: MealSlot::Lunch, .. }));
        assert_eq!(catalog.menu(MealSlot::Lunch).await, "Greek yogurt bowl");
    }

    #[tokio::test]
    async fn test_regenerate_failure_keeps_content() {
        let catalog = ContentCatalog::new();
        let before = catalog.menu(MealSlot::Dinner).await;
        let generator =
            ScriptedGenerator::new(Err(AppError::ExternalService("quota exceeded".to_string())));

        let err = catalog
            .regenerate(ContentTarget::Meal(MealSlot::Dinner), monday(), &generator)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(catalog.menu(MealSlot::Dinner).await, before);
    }

    #[tokio::test]
    async fn test_regenerate_workout_on_rest_day_targets_next_workout() {
        let catalog = ContentCatalog::new();
        let generator = ScriptedGenerator::new(Ok("Deadlift - 5x5\nPull-ups - 4x8".to_string()));
        // Tuesday: next workout day is Wednesday.
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let outcome = catalog
            .regenerate(ContentTarget::Workout, tuesday, &generator)
            .await
            .unwrap();

        let RegenOutcome::WorkoutReplaced(day) = outcome else {
            panic!("expected replaced workout");
        };
        assert_eq!(day.id, WorkoutDayId::Wednesday);
        assert_eq!(day.title, "Back & Biceps");
        let stored = catalog.workout_day(WorkoutDayId::Wednesday).await.unwrap();
        assert_eq!(stored.exercises.len(), 2);
        assert!(generator.prompts.lock().unwrap()[0].contains("Back & Biceps"));
    }

    #[tokio::test]
    async fn test_regenerate_unparsed_workout_keeps_previous() {
        let catalog = ContentCatalog::new();
        let before = catalog.workout_day(WorkoutDayId::Monday).await.unwrap();
        let generator = ScriptedGenerator::new(Ok("Go for a swim.".to_string()));

        let outcome = catalog
            .regenerate(ContentTarget::Workout, monday(), &generator)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RegenOutcome::Unparsed {
                day: WorkoutDayId::Monday,
                raw: "Go for a swim.".to_string()
            }
        );
        assert_eq!(catalog.workout_day(WorkoutDayId::Monday).await.unwrap(), before);
    }
}
