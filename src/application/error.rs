use std::fmt;

use thiserror::Error;

use crate::storage::StoreError;

/// The service operation that was running when a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Accept,
    ListSorted,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Accept => "accept",
            Operation::ListSorted => "list_sorted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service operation could not complete because the store failed.
#[derive(Error, Debug)]
#[error("{op} failed: {source}")]
pub struct OperationError {
    pub op: Operation,
    #[source]
    pub source: StoreError,
}

impl OperationError {
    pub fn new(op: Operation, source: StoreError) -> Self {
        Self { op, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_names_operation_and_cause() {
        let err = OperationError::new(
            Operation::ListSorted,
            StoreError::Unavailable("connection refused".into()),
        );
        assert_eq!(
            err.to_string(),
            "list_sorted failed: store unavailable: connection refused"
        );
        assert!(err.source().is_some());
    }
}
