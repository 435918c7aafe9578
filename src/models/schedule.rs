// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout schedule and the static day definitions.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a scheduled workout day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutDayId {
    Monday,
    Wednesday,
    Friday,
}

impl WorkoutDayId {
    pub const ALL: [WorkoutDayId; 3] = [
        WorkoutDayId::Monday,
        WorkoutDayId::Wednesday,
        WorkoutDayId::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutDayId::Monday => "monday",
            WorkoutDayId::Wednesday => "wednesday",
            WorkoutDayId::Friday => "friday",
        }
    }
}

impl fmt::Display for WorkoutDayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutDayId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(WorkoutDayId::Monday),
            "wednesday" => Ok(WorkoutDayId::Wednesday),
            "friday" => Ok(WorkoutDayId::Friday),
            other => Err(format!("unknown workout day: {}", other)),
        }
    }
}

/// What a calendar date is scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "day", rename_all = "lowercase")]
pub enum DayPlan {
    Workout(WorkoutDayId),
    Rest,
}

impl DayPlan {
    pub fn label(&self) -> &'static str {
        match self {
            DayPlan::Workout(id) => id.as_str(),
            DayPlan::Rest => "rest",
        }
    }
}

/// One exercise row of a workout day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Display target such as "4x10"
    pub target: String,
    /// Number of sets that can be marked individually
    pub sets: usize,
}

impl Exercise {
    pub fn new(name: &str, target: &str, sets: usize) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
            sets,
        }
    }
}

/// A named, fixed set of exercises bound to a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub id: WorkoutDayId,
    pub title: String,
    pub exercises: Vec<Exercise>,
}

/// Map a date to its workout day, or rest.
pub fn resolve_workout_day(date: NaiveDate) -> DayPlan {
    match date.weekday() {
        Weekday::Mon => DayPlan::Workout(WorkoutDayId::Monday),
        Weekday::Wed => DayPlan::Workout(WorkoutDayId::Wednesday),
        Weekday::Fri => DayPlan::Workout(WorkoutDayId::Friday),
        _ => DayPlan::Rest,
    }
}

/// Two-letter weekday label.
pub fn short_weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// First workout day on or after `date`.
pub fn next_workout_day(date: NaiveDate) -> WorkoutDayId {
    (0..7)
        .filter_map(|offset| match resolve_workout_day(date + Duration::days(offset)) {
            DayPlan::Workout(id) => Some(id),
            DayPlan::Rest => None,
        })
        .next()
        .unwrap_or(WorkoutDayId::Monday)
}

/// Built-in workout days loaded at startup.
pub fn default_workout_days() -> Vec<WorkoutDay> {
    vec![
        WorkoutDay {
            id: WorkoutDayId::Monday,
            title: "Chest & Triceps".to_string(),
            exercises: vec![
                Exercise::new("Bench press", "4x8", 4),
                Exercise::new("Incline dumbbell press", "3x10", 3),
                Exercise::new("Cable crossover", "3x12", 3),
                Exercise::new("Dips", "3x10", 3),
                Exercise::new("French press", "3x10", 3),
                Exercise::new("Rope pushdown", "3x12", 3),
                Exercise::new("Plank", "3x60s", 3),
            ],
        },
        WorkoutDay {
            id: WorkoutDayId::Wednesday,
            title: "Back & Biceps".to_string(),
            exercises: vec![
                Exercise::new("Pull-ups", "4x8", 4),
                Exercise::new("Barbell row", "4x8", 4),
                Exercise::new("Lat pulldown", "3x10", 3),
                Exercise::new("Seated cable row", "3x12", 3),
                Exercise::new("Barbell curl", "3x10", 3),
                Exercise::new("Hammer curl", "3x12", 3),
                Exercise::new("Hanging leg raise", "3x15", 3),
            ],
        },
        WorkoutDay {
            id: WorkoutDayId::Friday,
            title: "Legs & Shoulders".to_string(),
            exercises: vec![
                Exercise::new("Squat", "4x8", 4),
                Exercise::new("Romanian deadlift", "3x10", 3),
                Exercise::new("Leg press", "3x12", 3),
                Exercise::new("Walking lunges", "3x12", 3),
                Exercise::new("Overhead press", "4x8", 4),
                Exercise::new("Lateral raise", "3x15", 3),
                Exercise::new("Calf raise", "4x15", 4),
            ],
        },
    ]
}

/// Built-in rest day checklist.
pub fn default_rest_checklist() -> Vec<String> {
    [
        "Stretching 15 min",
        "Walk 8000+ steps",
        "Drink 2.5 l of water",
        "Foam rolling",
        "Sleep 8 hours",
    ]
    .iter()
    .map(|item| item.to_string())
    .collect()
}
