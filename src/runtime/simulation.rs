//! Wires the components into a running simulation and awaits its completion.
//!
//! Components are spawned leaves-first: the report sink (no dependents), the
//! worker pool, the coordinator over the workers, and finally the arrival
//! source feeding the coordinator's inbox. Every component thread returns
//! `Result<_, ShopError>`, and any fault — protocol violation, unexpected
//! channel closure, panic — propagates to the caller instead of being
//! absorbed.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded};
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::core::arrivals::spawn_arrival_source;
use crate::core::coordinator::ShopCoordinator;
use crate::core::error::{AppResult, ShopError};
use crate::core::report::{spawn_report_sink, RunReport};
use crate::core::worker::spawn_service_worker;
use crate::util::timing::DurationSource;

/// Run one complete simulation to its terminal summary.
///
/// Validates `config` before any thread starts, spawns all components, and
/// blocks until the report sink has received the final summary — the
/// simulation's externally visible completion signal. `service_duration` is
/// cloned once per worker so each worker draws independently.
///
/// # Errors
///
/// Returns an error for an invalid configuration, any protocol violation or
/// delivery failure inside a component, or a panicked component thread.
pub fn run<A, S>(config: SimConfig, arrival_delay: A, service_duration: S) -> AppResult<RunReport>
where
    A: DurationSource + Send + 'static,
    S: DurationSource + Clone + Send + 'static,
{
    config.validate().map_err(ShopError::InvalidConfig)?;
    info!(
        num_clients = config.num_clients,
        waiting_capacity = config.waiting_capacity,
        worker_count = config.worker_count,
        "starting simulation"
    );

    let (event_tx, event_rx) = unbounded();
    let (shop_tx, shop_rx) = unbounded();

    let (sink_join, sink) = spawn_report_sink(event_rx)?;

    let mut worker_joins = Vec::with_capacity(config.worker_count);
    let mut assignment_senders = Vec::with_capacity(config.worker_count);
    for worker_id in 0..config.worker_count {
        // A depth of 1 suffices: the coordinator only dispatches to a worker
        // it has marked idle, so the channel is always empty at send time.
        let (assign_tx, assign_rx) = bounded(1);
        assignment_senders.push(assign_tx);
        worker_joins.push(spawn_service_worker(
            worker_id,
            assign_rx,
            shop_tx.clone(),
            service_duration.clone(),
        )?);
    }

    let coordinator = ShopCoordinator::new(config.waiting_capacity, assignment_senders, event_tx);
    let coordinator_join = thread::Builder::new()
        .name("shop-coordinator".into())
        .spawn(move || coordinator.run(&shop_rx))?;

    let arrivals_join = spawn_arrival_source(config.num_clients, arrival_delay, shop_tx)?;

    // Join in dependency order. The coordinator finishes first by
    // construction: it only stops after emitting the summary (or on a fault,
    // which closes the channels the other threads block on).
    let state = join_component("coordinator", coordinator_join)?;
    join_component("arrival source", arrivals_join)?;
    for (worker_id, join) in worker_joins.into_iter().enumerate() {
        join_component(&format!("worker {worker_id}"), join)?;
    }
    let report = join_component("report sink", sink_join)?;

    debug!(
        arrived = state.arrived(),
        served = state.served(),
        rejected = state.rejected(),
        "final shop state"
    );
    debug_assert_eq!(state.served() + state.rejected(), state.arrived());
    debug_assert_eq!(sink.totals().served, report.served);

    info!(
        served = report.served,
        rejected = report.rejected,
        "simulation complete"
    );
    Ok(report)
}

/// Join a component thread, mapping both its error result and a panic into
/// the caller-facing error.
fn join_component<T>(name: &str, handle: JoinHandle<Result<T, ShopError>>) -> AppResult<T> {
    match handle.join() {
        Ok(result) => result.map_err(|e| anyhow::Error::new(e).context(format!("{name} failed"))),
        Err(_) => Err(anyhow::anyhow!("{name} thread panicked")),
    }
}
