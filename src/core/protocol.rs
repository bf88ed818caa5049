//! Message taxonomy shared by the simulation components.
//!
//! All coordination happens through these closed, tagged types. The coordinator
//! dispatches on [`ShopMessage`] variants only; there is no payload-type
//! inspection and no sentinel values sharing a channel with domain data.

use serde::{Deserialize, Serialize};

/// An arriving client. Immutable once created by the arrival source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier.
    pub id: u64,
    /// Position in the arrival stream (0-based).
    pub arrival_seq: u64,
}

/// Lifecycle phase of the shop.
///
/// Transitions are strictly `Open -> Closing -> Closed`, each at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting arrivals and completions.
    Open,
    /// Arrival stream has ended; draining admitted clients.
    Closing,
    /// All admitted clients dispositioned; final report emitted.
    Closed,
}

/// Inbound messages accepted by the coordinator on its single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopMessage {
    /// A client arrived at the shop. Valid only while [`Phase::Open`].
    Arrival(Client),
    /// A worker finished serving a client. Valid in `Open` or `Closing`.
    Completion {
        /// The client whose service finished.
        client_id: u64,
        /// Index of the reporting worker.
        worker_id: usize,
    },
    /// The arrival stream has ended. Sent exactly once, last.
    Close,
}

/// A client handed to a worker for service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The client to serve.
    pub client: Client,
}

/// How a client's visit to the shop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    /// The client was admitted and served to completion.
    Served,
    /// The client was turned away at arrival.
    Rejected,
}

/// The single disposition record produced for each client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOutcome {
    /// The client this outcome belongs to.
    pub client_id: u64,
    /// Served or rejected.
    pub kind: OutcomeKind,
}

/// Observable events emitted by the coordinator, in send order.
///
/// The stream is totally ordered because the coordinator is the only sender.
/// `Summary` is terminal: it is the simulation's externally visible completion
/// signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopEvent {
    /// A client was admitted into the waiting room.
    Admitted {
        /// The admitted client.
        client_id: u64,
        /// Seats occupied immediately after admission.
        seats_occupied: u32,
    },
    /// A client was turned away at capacity.
    Rejected {
        /// The rejected client.
        client_id: u64,
    },
    /// A client was dispatched to a worker.
    ServiceStarted {
        /// The dispatched client.
        client_id: u64,
        /// The worker now serving it.
        worker_id: usize,
    },
    /// A worker finished serving a client.
    ServiceFinished {
        /// The served client.
        client_id: u64,
        /// The worker that served it.
        worker_id: usize,
    },
    /// Terminal totals, emitted once when the shop closes.
    Summary {
        /// Clients served to completion.
        served: u64,
        /// Clients turned away.
        rejected: u64,
    },
}
