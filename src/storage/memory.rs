use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Number;

use super::{NumberStore, StoreError};

/// Process-local store backed by a vector. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryNumberStore {
    numbers: RwLock<Vec<Number>>,
}

impl InMemoryNumberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries recorded so far.
    pub async fn len(&self) -> usize {
        self.numbers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.numbers.read().await.is_empty()
    }
}

#[async_trait]
impl NumberStore for InMemoryNumberStore {
    async fn append(&self, n: Number) -> Result<(), StoreError> {
        self.numbers.write().await.push(n);
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Number>, StoreError> {
        Ok(self.numbers.read().await.clone())
    }
}
