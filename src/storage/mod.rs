mod error;
mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::domain::Number;

pub use error::*;
pub use memory::*;
pub use sqlite::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Durable, append-only keeper of numbers.
///
/// Implementations make no ordering promise for `scan_all`; callers sort.
/// Nothing here retries: every failure goes straight back to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NumberStore: Send + Sync {
    /// Record one number. On success it shows up in every later scan.
    async fn append(&self, n: Number) -> Result<(), StoreError>;

    /// Every number appended so far, in no particular order.
    /// An empty store yields an empty vector.
    async fn scan_all(&self) -> Result<Vec<Number>, StoreError>;
}

#[async_trait]
impl<T: NumberStore + ?Sized> NumberStore for std::sync::Arc<T> {
    async fn append(&self, n: Number) -> Result<(), StoreError> {
        (**self).append(n).await
    }

    async fn scan_all(&self) -> Result<Vec<Number>, StoreError> {
        (**self).scan_all().await
    }
}
