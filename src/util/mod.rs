//! Shared utilities.

pub mod telemetry;
pub mod timing;

pub use telemetry::*;
pub use timing::*;
