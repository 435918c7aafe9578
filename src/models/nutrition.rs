// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-day nutrition and activity bookkeeping.
//!
//! Intake is the manual total when one has been set, otherwise the sum of
//! logged meals plus the signed adjustment accumulator. Net is intake minus
//! the running burned total.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub kcal: f64,
}

/// A logged calorie-burning activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub name: String,
    pub burned_kcal: f64,
}

/// Verdict stored by the last day close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    #[default]
    Unset,
    Ok,
    Incomplete,
}

/// Nutrition record for one user and date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionRecord {
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub protein_grams: Option<u32>,
    #[serde(default)]
    pub kcal_adjustment: f64,
    #[serde(default)]
    pub manual_total_kcal: Option<i64>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
    /// Running sum of `activities[].burned_kcal`
    #[serde(default)]
    pub burned_kcal_total: f64,
    #[serde(default)]
    pub day_status: DayStatus,
    #[serde(default)]
    pub closed: bool,
}

impl NutritionRecord {
    pub fn add_meal(&mut self, name: &str, kcal: f64) {
        self.meals.push(Meal {
            name: name.to_string(),
            kcal,
        });
    }

    pub fn set_protein(&mut self, grams: u32) {
        self.protein_grams = Some(grams);
    }

    pub fn adjust_kcal(&mut self, delta: f64) {
        self.kcal_adjustment += delta;
    }

    /// Once set, the manual total overrides the computed sum.
    pub fn set_manual_total(&mut self, total: i64) {
        self.manual_total_kcal = Some(total);
    }

    pub fn add_activity(&mut self, name: &str, burned_kcal: f64) {
        self.activities.push(ActivityEntry {
            name: name.to_string(),
            burned_kcal,
        });
        self.burned_kcal_total += burned_kcal;
    }

    pub fn intake(&self) -> f64 {
        match self.manual_total_kcal {
            Some(total) => total as f64,
            None => self.meals.iter().map(|m| m.kcal).sum::<f64>() + self.kcal_adjustment,
        }
    }

    pub fn burned(&self) -> f64 {
        self.burned_kcal_total
    }

    pub fn net(&self) -> f64 {
        self.intake() - self.burned()
    }

    /// True when the intake comes from the manual override.
    pub fn is_manual(&self) -> bool {
        self.manual_total_kcal.is_some()
    }
}

/// True when an amount is nonzero at whole-kcal precision.
///
/// Sums of fractional inputs can leave residue such as `5.5e-17`.
pub fn is_logged_kcal(kcal: f64) -> bool {
    kcal.round() != 0.0
}

fn normalize(raw: &str) -> String {
    raw.trim().replace(',', ".")
}

/// Parse a non-negative calorie amount.
pub fn parse_kcal(raw: &str) -> Result<f64> {
    let value: f64 = normalize(raw)
        .parse()
        .map_err(|_| AppError::InvalidNumber(format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidNumber(format!(
            "'{}' must be zero or more",
            raw.trim()
        )));
    }
    Ok(value)
}

/// Parse a signed calorie delta; an explicit leading `+` or `-` is accepted.
pub fn parse_delta(raw: &str) -> Result<f64> {
    let value: f64 = normalize(raw)
        .parse()
        .map_err(|_| AppError::InvalidNumber(format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() {
        return Err(AppError::InvalidNumber(format!(
            "'{}' is not a finite number",
            raw.trim()
        )));
    }
    Ok(value)
}

/// Parse a non-negative whole number of protein grams.
pub fn parse_protein(raw: &str) -> Result<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        AppError::InvalidNumber(format!("'{}' is not a whole number of grams", raw.trim()))
    })
}

/// Parse a manual daily total; must be a non-negative integer.
pub fn parse_manual_total(raw: &str) -> Result<i64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidNumber(format!("'{}' is not a whole number", raw.trim())))?;
    if value < 0 {
        return Err(AppError::InvalidNumber(format!(
            "'{}' must be zero or more",
            raw.trim()
        )));
    }
    Ok(value)
}
