// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod message;
pub mod nutrition;
pub mod progress;
pub mod schedule;

pub use message::{Button, EventKind, InboundEvent, Keyboard, Reply};
pub use nutrition::{ActivityEntry, DayStatus, Meal, NutritionRecord};
pub use progress::{DailyRecord, DayProgress, UserId};
pub use schedule::{
    resolve_workout_day, short_weekday_label, DayPlan, Exercise, WorkoutDay, WorkoutDayId,
};
