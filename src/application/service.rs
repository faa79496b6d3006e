use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Number, sort_ascending};
use crate::storage::NumberStore;

use super::{Observer, Operation, OperationError, TracingObserver};

/// The two operations exposed to the request boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NumberOrdering: Send + Sync {
    /// Durably record one number.
    async fn accept(&self, n: Number) -> Result<(), OperationError>;

    /// Every recorded number in ascending order.
    async fn list_sorted(&self) -> Result<Vec<Number>, OperationError>;
}

/// Stateless orchestrator that persists through a [`NumberStore`] and sorts on read.
///
/// Holds no mutable state of its own, so one instance can serve any number of
/// concurrent callers and several instances may share a store.
pub struct OrderingService<S> {
    store: S,
    observer: Arc<dyn Observer>,
}

impl<S: NumberStore> OrderingService<S> {
    /// Create a new ordering service over `store`, reporting to `observer`.
    pub fn new(store: S, observer: Arc<dyn Observer>) -> Self {
        Self { store, observer }
    }

    /// Create a service that reports through `tracing`.
    pub fn with_tracing(store: S) -> Self {
        Self::new(store, Arc::new(TracingObserver))
    }

    fn fail(&self, err: OperationError) -> OperationError {
        self.observer.failed(&err);
        err
    }
}

#[async_trait]
impl<S: NumberStore> NumberOrdering for OrderingService<S> {
    async fn accept(&self, n: Number) -> Result<(), OperationError> {
        self.store
            .append(n)
            .await
            .map_err(|e| self.fail(OperationError::new(Operation::Accept, e)))?;

        self.observer.accepted(n);
        Ok(())
    }

    async fn list_sorted(&self) -> Result<Vec<Number>, OperationError> {
        let numbers = self
            .store
            .scan_all()
            .await
            .map_err(|e| self.fail(OperationError::new(Operation::ListSorted, e)))?;

        let sorted = sort_ascending(numbers);
        self.observer.listed(sorted.len());
        Ok(sorted)
    }
}
