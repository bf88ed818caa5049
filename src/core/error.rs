//! Error types for simulation components.

use thiserror::Error;

use crate::core::protocol::Phase;

/// Errors produced by simulation components.
///
/// Protocol violations (`ArrivalAfterClose`, `UnexpectedClose`,
/// `UnexpectedCompletion`, `UnknownWorker`) indicate a broken invariant in the
/// coordination protocol itself; the affected component terminates and the
/// fault propagates to the caller rather than being downgraded to a log line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// Configuration validation failed before any component started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An arrival was received after the shop stopped accepting clients.
    #[error("received arrival for client {client_id} after close")]
    ArrivalAfterClose {
        /// Identifier of the offending client.
        client_id: u64,
    },
    /// A close signal was received in a phase that cannot accept one.
    #[error("received close signal while {phase:?}")]
    UnexpectedClose {
        /// Phase the coordinator was in when the signal arrived.
        phase: Phase,
    },
    /// A completion was reported that matches no busy worker or admitted client.
    #[error("unexpected completion for client {client_id} while {phase:?}")]
    UnexpectedCompletion {
        /// Identifier of the client the completion named.
        client_id: u64,
        /// Phase the coordinator was in when the report arrived.
        phase: Phase,
    },
    /// A completion named a worker index outside the pool.
    #[error("completion from unknown worker {worker_id}")]
    UnknownWorker {
        /// The out-of-range worker index.
        worker_id: usize,
    },
    /// A channel closed while the protocol still expected traffic on it.
    #[error("channel closed unexpectedly: {0}")]
    ChannelClosed(&'static str),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
