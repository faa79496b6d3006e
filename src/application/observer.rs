use crate::domain::Number;

use super::OperationError;

/// Receives notable events from the ordering service.
///
/// Handed to the service at construction so callers pick where the events go.
pub trait Observer: Send + Sync {
    fn accepted(&self, _n: Number) {}

    fn listed(&self, _count: usize) {}

    fn failed(&self, err: &OperationError);
}

/// Forwards service events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn accepted(&self, n: Number) {
        tracing::debug!(num = n, "number accepted");
    }

    fn listed(&self, count: usize) {
        tracing::debug!(count, "numbers listed");
    }

    fn failed(&self, err: &OperationError) {
        tracing::error!(op = %err.op, error = %err.source, "operation failed");
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn failed(&self, _err: &OperationError) {}
}
