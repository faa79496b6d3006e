pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use application::{NumberOrdering, OrderingService};
pub use domain::*;
pub use storage::NumberStore;
