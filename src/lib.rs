//! # Shopsim
//!
//! A bounded-capacity service shop simulation built from message-passing components.
//!
//! The simulation models a shop that admits arriving clients up to a waiting-room
//! limit, hands admitted clients to a pool of workers for variable-duration
//! service, accounts for every outcome (served vs. rejected), and drains
//! gracefully once the finite arrival stream ends.
//!
//! ## Core Problem Solved
//!
//! Coordinating admission control, worker dispatch, completion accounting, and a
//! close/drain handshake across independently scheduled components without shared
//! mutable state:
//!
//! - **Bounded admission**: clients beyond the waiting-room capacity are rejected
//!   synchronously, never blocked or retried
//! - **Exclusive state ownership**: all counters live inside the coordinator's
//!   single-threaded message loop; no locks guard shop state
//! - **Tagged protocol**: `Arrival | Completion | Close` as a closed enum instead
//!   of runtime payload-type inspection or string sentinels
//! - **Graceful drain**: after `Close`, every admitted client finishes before the
//!   shop reports its final totals and terminates
//!
//! ## Component Topology
//!
//! Each component runs as a dedicated OS thread, communicating only through
//! `crossbeam-channel` channels:
//!
//! ```text
//! ArrivalSource --(Arrival, Close)--> ShopCoordinator <--(Completion)-- ServiceWorker x N
//!                                           |
//!                                      (ShopEvent)
//!                                           v
//!                                      ReportSink --> RunReport
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use shopsim::config::SimConfig;
//! use shopsim::runtime::run;
//! use shopsim::util::timing::FixedDelay;
//! use std::time::Duration;
//!
//! let config = SimConfig::new()
//!     .with_num_clients(20)
//!     .with_waiting_capacity(4)
//!     .with_worker_count(2);
//!
//! let report = run(
//!     config,
//!     FixedDelay::new(Duration::from_millis(1)),
//!     FixedDelay::new(Duration::from_millis(5)),
//! )?;
//! println!("served {} rejected {}", report.served, report.rejected);
//! ```
//!
//! The caller observes completion by receiving the final summary through the
//! report sink; intermediate events are also logged via `tracing`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Coordination protocol: messages, coordinator state machine, workers, arrivals, reporting.
pub mod core;
/// Configuration model for simulation runs.
pub mod config;
/// Thread spawning and wiring of a full simulation.
pub mod runtime;
/// Shared utilities: telemetry and duration sources.
pub mod util;
