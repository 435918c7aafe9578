// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer for daily records and subscribers.
//!
//! `DailyStore` is the get/upsert seam; `MemoryStore` keeps everything in
//! process memory, so history is lost on restart. `RecordStore` adds the
//! per-user mutation lock and the read-modify-write commit on top.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{DailyRecord, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keyed storage for daily records and the reminder subscriber set.
#[async_trait]
pub trait DailyStore: Send + Sync {
    /// Get the record for a user and date, if one was ever written.
    async fn get_day(&self, user: UserId, date: NaiveDate) -> Result<Option<DailyRecord>>;

    /// Create or replace the record for a user and date.
    async fn upsert_day(&self, user: UserId, date: NaiveDate, record: &DailyRecord) -> Result<()>;

    /// Register a subscriber. Returns `true` if the user was new.
    async fn add_subscriber(&self, user: UserId) -> Result<bool>;

    /// All subscribers, in ascending id order.
    async fn subscribers(&self) -> Result<Vec<UserId>>;
}

/// Per-user mutation locks, shared by every writer.
pub type UserLocks = Arc<DashMap<UserId, Arc<Mutex<()>>>>;

/// Record access with single-step commits.
///
/// Mutations for one user are serialised; a mutation that fails leaves the
/// stored record untouched.
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn DailyStore>,
    locks: UserLocks,
}

impl RecordStore {
    pub fn new(store: Arc<dyn DailyStore>) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// In-memory store, as used by the running bot and by tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn backend(&self) -> &Arc<dyn DailyStore> {
        &self.store
    }

    /// Snapshot of a day; an empty record if nothing was written yet.
    pub async fn read(&self, user: UserId, date: NaiveDate) -> Result<DailyRecord> {
        Ok(self.store.get_day(user, date).await?.unwrap_or_default())
    }

    /// Apply `mutate` to a copy of the day and store it if it succeeds.
    pub async fn update<T, F>(&self, user: UserId, date: NaiveDate, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut DailyRecord) -> Result<T>,
    {
        let lock = self
            .locks
            .entry(user)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let mut record = self.read(user, date).await?;
        let out = mutate(&mut record)?;
        self.store.upsert_day(user, date, &record).await?;
        Ok(out)
    }

    pub async fn add_subscriber(&self, user: UserId) -> Result<bool> {
        self.store.add_subscriber(user).await
    }

    pub async fn subscribers(&self) -> Result<Vec<UserId>> {
        self.store.subscribers().await
    }
}
