//! The report sink: consumes the coordinator's event stream, aggregates
//! outcomes, and delivers the terminal summary to the caller.
//!
//! The simulation is complete only once this component has received
//! [`ShopEvent::Summary`]; callers awaiting completion join the sink thread,
//! not the coordinator. While the run is in flight, a [`SinkHandle`] exposes a
//! snapshot of the totals observed so far.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::core::error::ShopError;
use crate::core::protocol::{OutcomeKind, ServiceOutcome, ShopEvent};

/// Running totals observed by the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Served outcomes seen so far.
    pub served: u64,
    /// Rejected outcomes seen so far.
    pub rejected: u64,
}

/// Shared read handle onto the sink's running totals.
#[derive(Debug, Clone)]
pub struct SinkHandle {
    totals: Arc<Mutex<Totals>>,
}

impl SinkHandle {
    /// Snapshot of the totals observed so far.
    #[must_use]
    pub fn totals(&self) -> Totals {
        *self.totals.lock()
    }
}

/// Final accounting for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Clients served to completion, per the terminal summary.
    pub served: u64,
    /// Clients turned away, per the terminal summary.
    pub rejected: u64,
    /// One disposition record per client, in observation order.
    pub outcomes: Vec<ServiceOutcome>,
}

/// Spawn the report sink thread.
///
/// The thread consumes events until `Summary` arrives, then returns the
/// [`RunReport`]. The event channel closing before the summary is a delivery
/// failure and surfaces as [`ShopError::ChannelClosed`].
///
/// # Errors
///
/// Returns an I/O error if the OS thread cannot be spawned.
pub fn spawn_report_sink(
    events: Receiver<ShopEvent>,
) -> io::Result<(JoinHandle<Result<RunReport, ShopError>>, SinkHandle)> {
    let totals = Arc::new(Mutex::new(Totals::default()));
    let handle = SinkHandle {
        totals: Arc::clone(&totals),
    };

    let join = thread::Builder::new().name("shop-sink".into()).spawn(move || {
        let mut outcomes = Vec::new();
        loop {
            let event = events
                .recv()
                .map_err(|_| ShopError::ChannelClosed("event stream"))?;
            match event {
                ShopEvent::Admitted { .. }
                | ShopEvent::ServiceStarted { .. } => {
                    debug!(?event, "observed");
                }
                ShopEvent::Rejected { client_id } => {
                    outcomes.push(ServiceOutcome {
                        client_id,
                        kind: OutcomeKind::Rejected,
                    });
                    totals.lock().rejected += 1;
                }
                ShopEvent::ServiceFinished { client_id, .. } => {
                    outcomes.push(ServiceOutcome {
                        client_id,
                        kind: OutcomeKind::Served,
                    });
                    totals.lock().served += 1;
                }
                ShopEvent::Summary { served, rejected } => {
                    info!(served, rejected, "final report received");
                    let seen = *totals.lock();
                    debug_assert_eq!(seen, Totals { served, rejected });
                    return Ok(RunReport {
                        served,
                        rejected,
                        outcomes,
                    });
                }
            }
        }
    })?;

    Ok((join, handle))
}
