// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day-close evaluation.
//!
//! The rule is presence-based: a day is incomplete if no calories were
//! logged, protein is missing or zero, or nothing was marked on the day's
//! workout or rest checklist. Marks are only counted when they point at an
//! item of the current plan.

use crate::models::nutrition::is_logged_kcal;
use crate::models::{DailyRecord, DayPlan, DayStatus};
use serde::Serialize;
use std::fmt;

/// Category that kept a day from closing as OK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingCategory {
    Calories,
    Protein,
    Workout,
    RestChecklist,
}

impl MissingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingCategory::Calories => "calories",
            MissingCategory::Protein => "protein",
            MissingCategory::Workout => "workout",
            MissingCategory::RestChecklist => "rest-checklist",
        }
    }
}

impl fmt::Display for MissingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of closing a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseVerdict {
    pub status: DayStatus,
    pub missing: Vec<MissingCategory>,
}

impl CloseVerdict {
    pub fn is_ok(&self) -> bool {
        self.status == DayStatus::Ok
    }
}

/// Judge a day's record against its plan.
///
/// `plan_items` is the exercise count of the current workout definition, or
/// the rest checklist length on a rest day.
pub fn evaluate(record: &DailyRecord, plan: DayPlan, plan_items: usize) -> CloseVerdict {
    let mut missing = Vec::new();

    if !is_logged_kcal(record.nutrition.intake()) {
        missing.push(MissingCategory::Calories);
    }
    if record.nutrition.protein_grams.unwrap_or(0) == 0 {
        missing.push(MissingCategory::Protein);
    }
    match plan {
        DayPlan::Workout(_) if record.progress.exercises_done(plan_items) == 0 => {
            missing.push(MissingCategory::Workout)
        }
        DayPlan::Rest if record.progress.rest_items_done(plan_items) == 0 => {
            missing.push(MissingCategory::RestChecklist)
        }
        _ => {}
    }

    let status = if missing.is_empty() {
        DayStatus::Ok
    } else {
        DayStatus::Incomplete
    };
    CloseVerdict { status, missing }
}

/// Store a verdict on the record. A later close overwrites an earlier one.
pub fn apply(record: &mut DailyRecord, verdict: &CloseVerdict) {
    record.nutrition.day_status = verdict.status;
    record.nutrition.closed = true;
}
