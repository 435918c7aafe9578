// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise, set and rest-checklist tracking.
//!
//! The workout day named by a caller is never trusted: it is re-derived from
//! the date and a mismatch is rejected before anything is written.

use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::{resolve_workout_day, DailyRecord, DayPlan, UserId, WorkoutDay, WorkoutDayId};
use crate::services::content::ContentCatalog;
use crate::services::day_close::{self, CloseVerdict};
use chrono::NaiveDate;
use std::sync::Arc;

/// Mutations and reads of per-user daily completion state.
#[derive(Clone)]
pub struct ProgressService {
    records: RecordStore,
    content: Arc<ContentCatalog>,
}

impl ProgressService {
    pub fn new(records: RecordStore, content: Arc<ContentCatalog>) -> Self {
        Self { records, content }
    }

    /// Workout definition for `day_id`, after checking it is the date's day.
    async fn scheduled_workout(&self, date: NaiveDate, day_id: WorkoutDayId) -> Result<WorkoutDay> {
        let plan = resolve_workout_day(date);
        if plan != DayPlan::Workout(day_id) {
            return Err(AppError::DayMismatch {
                date,
                expected: day_id.to_string(),
                actual: plan.label().to_string(),
            });
        }

        self.content
            .workout_day(day_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("workout day {}", day_id)))
    }

    /// Flip an exercise's completion. Returns the new state.
    pub async fn toggle_exercise(
        &self,
        user: UserId,
        date: NaiveDate,
        day_id: WorkoutDayId,
        index: usize,
    ) -> Result<bool> {
        let day = self.scheduled_workout(date, day_id).await?;
        let len = day.exercises.len();
        if index >= len {
            return Err(AppError::InvalidIndex { index, len });
        }

        let done = self
            .records
            .update(user, date, |record| Ok(record.progress.toggle_exercise(index)))
            .await?;

        tracing::debug!(user_id = %user, %date, day = %day_id, index, done, "Exercise toggled");
        Ok(done)
    }

    /// Flip one set of an exercise. Set marks do not complete the exercise.
    pub async fn toggle_set(
        &self,
        user: UserId,
        date: NaiveDate,
        day_id: WorkoutDayId,
        exercise: usize,
        set: usize,
    ) -> Result<bool> {
        let day = self.scheduled_workout(date, day_id).await?;
        let row = day.exercises.get(exercise).ok_or(AppError::InvalidIndex {
            index: exercise,
            len: day.exercises.len(),
        })?;
        if set >= row.sets {
            return Err(AppError::InvalidIndex {
                index: set,
                len: row.sets,
            });
        }

        let done = self
            .records
            .update(user, date, |record| Ok(record.progress.toggle_set(exercise, set)))
            .await?;

        tracing::debug!(user_id = %user, %date, day = %day_id, exercise, set, done, "Set toggled");
        Ok(done)
    }

    /// Flip a rest checklist item. Returns the new state.
    pub async fn toggle_rest_item(&self, user: UserId, date: NaiveDate, index: usize) -> Result<bool> {
        let plan = resolve_workout_day(date);
        if plan != DayPlan::Rest {
            return Err(AppError::DayMismatch {
                date,
                expected: DayPlan::Rest.label().to_string(),
                actual: plan.label().to_string(),
            });
        }

        let len = self.content.rest_checklist().await.len();
        if index >= len {
            return Err(AppError::InvalidIndex { index, len });
        }

        let done = self
            .records
            .update(user, date, |record| Ok(record.progress.toggle_rest_item(index)))
            .await?;

        tracing::debug!(user_id = %user, %date, index, done, "Rest item toggled");
        Ok(done)
    }

    /// Append a free-form cardio label to the side activity log.
    pub async fn add_activity_label(&self, user: UserId, date: NaiveDate, label: &str) -> Result<()> {
        let label = label.trim().to_string();
        self.records
            .update(user, date, |record| {
                record.progress.side_activities.push(label);
                Ok(())
            })
            .await?;

        tracing::info!(user_id = %user, %date, "Side activity logged");
        Ok(())
    }

    /// Snapshot of the day's record.
    pub async fn day(&self, user: UserId, date: NaiveDate) -> Result<DailyRecord> {
        self.records.read(user, date).await
    }

    /// Evaluate the day and store the verdict. Re-closing overwrites.
    pub async fn close_day(&self, user: UserId, date: NaiveDate) -> Result<CloseVerdict> {
        let plan = resolve_workout_day(date);
        let plan_items = match plan {
            DayPlan::Workout(id) => self
                .content
                .workout_day(id)
                .await
                .map_or(0, |day| day.exercises.len()),
            DayPlan::Rest => self.content.rest_checklist().await.len(),
        };
        let verdict = self
            .records
            .update(user, date, |record| {
                let verdict = day_close::evaluate(record, plan, plan_items);
                day_close::apply(record, &verdict);
                Ok(verdict)
            })
            .await?;

        tracing::info!(
            user_id = %user,
            %date,
            status = ?verdict.status,
            missing = ?verdict.missing,
            "Day closed"
        );
        Ok(verdict)
    }
}
