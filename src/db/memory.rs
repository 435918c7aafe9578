// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory `DailyStore` backed by `DashMap`.

use crate::db::DailyStore;
use crate::error::Result;
use crate::models::{DailyRecord, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::{DashMap, DashSet};

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    days: DashMap<(UserId, NaiveDate), DailyRecord>,
    subscribers: DashSet<UserId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (user, date) records.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[async_trait]
impl DailyStore for MemoryStore {
    async fn get_day(&self, user: UserId, date: NaiveDate) -> Result<Option<DailyRecord>> {
        Ok(self.days.get(&(user, date)).map(|entry| entry.value().clone()))
    }

    async fn upsert_day(&self, user: UserId, date: NaiveDate, record: &DailyRecord) -> Result<()> {
        self.days.insert((user, date), record.clone());
        Ok(())
    }

    async fn add_subscriber(&self, user: UserId) -> Result<bool> {
        let added = self.subscribers.insert(user);
        if added {
            tracing::info!(user_id = %user, "New subscriber");
        }
        Ok(added)
    }

    async fn subscribers(&self) -> Result<Vec<UserId>> {
        let mut users: Vec<UserId> = self.subscribers.iter().map(|u| *u).collect();
        users.sort();
        Ok(users)
    }
}
