//! Core coordination protocol: messages, coordinator, workers, arrivals, reporting.

pub mod arrivals;
pub mod coordinator;
pub mod error;
pub mod protocol;
pub mod report;
pub mod worker;

pub use arrivals::spawn_arrival_source;
pub use coordinator::{ShopCoordinator, ShopState, Step};
pub use error::{AppResult, ShopError};
pub use protocol::{
    Assignment, Client, OutcomeKind, Phase, ServiceOutcome, ShopEvent, ShopMessage,
};
pub use report::{spawn_report_sink, RunReport, SinkHandle, Totals};
pub use worker::spawn_service_worker;
