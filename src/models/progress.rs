// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user daily completion state.

use crate::models::nutrition::NutritionRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Opaque identifier of the person talking to the bot (chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion sets for one user and date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayProgress {
    /// Completed exercise indices of the date's workout day
    #[serde(default)]
    pub exercises: BTreeSet<usize>,
    /// Completed set indices per exercise index
    #[serde(default)]
    pub sets: BTreeMap<usize, BTreeSet<usize>>,
    /// Completed rest checklist indices
    #[serde(default)]
    pub rest_items: BTreeSet<usize>,
    /// Free-form cardio labels, separate from nutrition activities
    #[serde(default)]
    pub side_activities: Vec<String>,
}

/// Flip membership of `value`; returns the new membership.
fn flip(set: &mut BTreeSet<usize>, value: usize) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

impl DayProgress {
    pub fn toggle_exercise(&mut self, index: usize) -> bool {
        flip(&mut self.exercises, index)
    }

    pub fn toggle_set(&mut self, exercise: usize, set: usize) -> bool {
        let done = self.sets.entry(exercise).or_default();
        let now_done = flip(done, set);
        if done.is_empty() {
            self.sets.remove(&exercise);
        }
        now_done
    }

    pub fn toggle_rest_item(&mut self, index: usize) -> bool {
        flip(&mut self.rest_items, index)
    }

    pub fn is_set_done(&self, exercise: usize, set: usize) -> bool {
        self.sets
            .get(&exercise)
            .is_some_and(|done| done.contains(&set))
    }

    /// Completed exercises that still exist in a definition of `total` rows.
    pub fn exercises_done(&self, total: usize) -> usize {
        self.exercises.range(..total).count()
    }

    pub fn rest_items_done(&self, total: usize) -> usize {
        self.rest_items.range(..total).count()
    }
}

/// Everything tracked for one user on one date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub progress: DayProgress,
    #[serde(default)]
    pub nutrition: NutritionRecord,
}
