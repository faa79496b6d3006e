// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use numsort::Number;
use numsort::application::{NoopObserver, OrderingService};
use numsort::storage::{NumberStore, PoolOptions, SqliteNumberStore, StoreError};
use tempfile::TempDir;

pub fn sqlite_url(temp_dir: &TempDir) -> String {
    format!("sqlite:{}?mode=rwc", temp_dir.path().join("test.db").display())
}

/// Helper to create a store backed by a temporary database
pub async fn test_store() -> Result<(SqliteNumberStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = SqliteNumberStore::init(&sqlite_url(&temp_dir), &PoolOptions::default()).await?;
    Ok((store, temp_dir))
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(OrderingService<SqliteNumberStore>, TempDir)> {
    let (store, temp_dir) = test_store().await?;
    Ok((quiet(store), temp_dir))
}

/// Wrap a store in a service that discards observer events.
pub fn quiet<S: NumberStore>(store: S) -> OrderingService<S> {
    OrderingService::new(store, Arc::new(NoopObserver))
}

/// Store wrapper that refuses to append one specific value.
pub struct RejectingStore<S> {
    inner: S,
    rejected: Number,
}

impl<S> RejectingStore<S> {
    pub fn new(inner: S, rejected: Number) -> Self {
        Self { inner, rejected }
    }
}

#[async_trait]
impl<S: NumberStore> NumberStore for RejectingStore<S> {
    async fn append(&self, n: Number) -> Result<(), StoreError> {
        if n == self.rejected {
            return Err(StoreError::Unavailable(format!("refusing to store {n}")));
        }
        self.inner.append(n).await
    }

    async fn scan_all(&self) -> Result<Vec<Number>, StoreError> {
        self.inner.scan_all().await
    }
}

/// Store whose every call fails, as if the database were unreachable.
pub struct UnreachableStore;

#[async_trait]
impl NumberStore for UnreachableStore {
    async fn append(&self, _n: Number) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn scan_all(&self) -> Result<Vec<Number>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
