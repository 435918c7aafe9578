// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition ledger operations.
//!
//! Each operation parses the user's text first; an `InvalidNumber` leaves
//! the stored record untouched.

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::nutrition::{parse_delta, parse_kcal, parse_manual_total, parse_protein};
use crate::models::{NutritionRecord, UserId};
use chrono::NaiveDate;

/// Calorie, protein and burned-energy bookkeeping per user and date.
#[derive(Clone)]
pub struct NutritionLedger {
    records: RecordStore,
}

impl NutritionLedger {
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    pub async fn add_meal(
        &self,
        user: UserId,
        date: NaiveDate,
        name: &str,
        kcal_text: &str,
    ) -> Result<NutritionRecord> {
        let kcal = parse_kcal(kcal_text)?;
        let name = name.trim();
        let record = self
            .records
            .update(user, date, |record| {
                record.nutrition.add_meal(name, kcal);
                Ok(record.nutrition.clone())
            })
            .await?;

        tracing::info!(user_id = %user, %date, kcal, "Meal added");
        Ok(record)
    }

    pub async fn set_protein(
        &self,
        user: UserId,
        date: NaiveDate,
        grams_text: &str,
    ) -> Result<NutritionRecord> {
        let grams = parse_protein(grams_text)?;
        let record = self
            .records
            .update(user, date, |record| {
                record.nutrition.set_protein(grams);
                Ok(record.nutrition.clone())
            })
            .await?;

        tracing::info!(user_id = %user, %date, grams, "Protein set");
        Ok(record)
    }

    pub async fn adjust_kcal(
        &self,
        user: UserId,
        date: NaiveDate,
        delta_text: &str,
    ) -> Result<NutritionRecord> {
        let delta = parse_delta(delta_text)?;
        let record = self
            .records
            .update(user, date, |record| {
                record.nutrition.adjust_kcal(delta);
                Ok(record.nutrition.clone())
            })
            .await?;

        tracing::info!(user_id = %user, %date, delta, "Calories adjusted");
        Ok(record)
    }

    /// There is no way back to computed intake once a manual total is set.
    pub async fn set_manual_total(
        &self,
        user: UserId,
        date: NaiveDate,
        total_text: &str,
    ) -> Result<NutritionRecord> {
        let total = parse_manual_total(total_text)?;
        let record = self
            .records
            .update(user, date, |record| {
                record.nutrition.set_manual_total(total);
                Ok(record.nutrition.clone())
            })
            .await?;

        tracing::info!(user_id = %user, %date, total, "Manual total set");
        Ok(record)
    }

    pub async fn add_activity(
        &self,
        user: UserId,
        date: NaiveDate,
        name: &str,
        burned_text: &str,
    ) -> Result<NutritionRecord> {
        let burned = parse_kcal(burned_text)?;
        let name = name.trim();
        let record = self
            .records
            .update(user, date, |record| {
                record.nutrition.add_activity(name, burned);
                Ok(record.nutrition.clone())
            })
            .await?;

        tracing::info!(user_id = %user, %date, burned, "Activity added");
        Ok(record)
    }

    /// Snapshot of the day's nutrition record.
    pub async fn record(&self, user: UserId, date: NaiveDate) -> Result<NutritionRecord> {
        Ok(self.records.read(user, date).await?.nutrition)
    }
}
