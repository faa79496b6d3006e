// Application layer: the ordering use case and the errors it reports.

pub mod error;
mod observer;
mod service;

pub use error::*;
pub use observer::*;
pub use service::*;
