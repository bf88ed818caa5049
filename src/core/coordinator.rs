//! The shop coordinator: admission control, worker dispatch, completion
//! accounting, and the close/drain state machine.
//!
//! The coordinator is a single-threaded state machine with exactly one
//! blocking receive point. All shop state is owned exclusively by this
//! component and mutated only inside its own message-handling steps; no other
//! component reads or writes it, so no locks are involved. Cross-component
//! state changes travel as message content only.
//!
//! # Design Principles
//!
//! - **No polling**: the run loop blocks on channel recv
//! - **Atomic handling**: each inbound message is processed to completion
//!   before the next is received, so arrival/completion interleavings from
//!   different senders cannot corrupt the counters
//! - **Capacity bounds admission, not concurrency**: both waiting and
//!   in-service clients count against `seats_occupied`; a separate FIFO holds
//!   admitted clients no worker is free for yet

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::core::error::ShopError;
use crate::core::protocol::{Assignment, Client, Phase, ShopEvent, ShopMessage};

/// Counters and lifecycle phase of the shop.
///
/// Exclusively owned by [`ShopCoordinator`]; exposed read-only through
/// accessors so outside observers can never break the invariants
/// `0 <= seats_occupied <= capacity` and `served + rejected <= arrived`.
#[derive(Debug, Clone)]
pub struct ShopState {
    capacity: u32,
    seats_occupied: u32,
    arrived: u64,
    served: u64,
    rejected: u64,
    phase: Phase,
}

impl ShopState {
    const fn new(capacity: u32) -> Self {
        Self {
            capacity,
            seats_occupied: 0,
            arrived: 0,
            served: 0,
            rejected: 0,
            phase: Phase::Open,
        }
    }

    /// Waiting-room capacity (waiting plus in-service clients).
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Clients currently admitted and not yet served.
    #[must_use]
    pub const fn seats_occupied(&self) -> u32 {
        self.seats_occupied
    }

    /// Total clients that have arrived, admitted or not.
    #[must_use]
    pub const fn arrived(&self) -> u64 {
        self.arrived
    }

    /// Clients served to completion.
    #[must_use]
    pub const fn served(&self) -> u64 {
        self.served
    }

    /// Clients turned away at capacity.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

/// The coordinator's view of one worker: its assignment channel and whether it
/// currently has a client. The busy flag is authoritative; workers themselves
/// never refuse an assignment.
struct WorkerHandle {
    assignments: Sender<Assignment>,
    busy: bool,
}

/// Loop control returned by [`ShopCoordinator::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep receiving messages.
    Continue,
    /// The shop is closed and the summary has been emitted; stop.
    Done,
}

/// Owns the shop state and processes the inbound message stream.
pub struct ShopCoordinator {
    state: ShopState,
    workers: Vec<WorkerHandle>,
    /// Admitted clients waiting for a worker, in arrival order.
    pending: VecDeque<Client>,
    events: Sender<ShopEvent>,
}

impl ShopCoordinator {
    /// Create a coordinator over a pool of worker assignment channels.
    ///
    /// Worker indices are the positions in `assignment_senders`; dispatch
    /// tie-breaks pick the lowest idle index for determinism.
    #[must_use]
    pub fn new(
        capacity: u32,
        assignment_senders: Vec<Sender<Assignment>>,
        events: Sender<ShopEvent>,
    ) -> Self {
        let workers = assignment_senders
            .into_iter()
            .map(|assignments| WorkerHandle {
                assignments,
                busy: false,
            })
            .collect();
        Self {
            state: ShopState::new(capacity),
            workers,
            pending: VecDeque::new(),
            events,
        }
    }

    /// Read-only view of the shop counters and phase.
    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    /// Process one inbound message atomically.
    ///
    /// # Errors
    ///
    /// Returns a protocol-violation error for an `Arrival` outside
    /// [`Phase::Open`], a misplaced `Close`, or a `Completion` that matches no
    /// busy worker, and [`ShopError::ChannelClosed`] if a downstream channel
    /// is gone while traffic is still expected.
    pub fn handle(&mut self, msg: ShopMessage) -> Result<Step, ShopError> {
        match msg {
            ShopMessage::Arrival(client) => self.on_arrival(client),
            ShopMessage::Completion {
                client_id,
                worker_id,
            } => self.on_completion(client_id, worker_id),
            ShopMessage::Close => self.on_close(),
        }
    }

    /// Receive and handle messages until the shop closes.
    ///
    /// Consumes the coordinator; dropping it on return closes the assignment
    /// channels, which lets idle workers exit their recv loops naturally.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::handle`], or
    /// [`ShopError::ChannelClosed`] if the inbox closes before the shop does.
    pub fn run(mut self, inbox: &Receiver<ShopMessage>) -> Result<ShopState, ShopError> {
        loop {
            let msg = inbox
                .recv()
                .map_err(|_| ShopError::ChannelClosed("coordinator inbox"))?;
            if self.handle(msg)? == Step::Done {
                break;
            }
        }
        Ok(self.state)
    }

    fn on_arrival(&mut self, client: Client) -> Result<Step, ShopError> {
        if self.state.phase != Phase::Open {
            return Err(ShopError::ArrivalAfterClose {
                client_id: client.id,
            });
        }
        self.state.arrived += 1;
        if self.state.seats_occupied < self.state.capacity {
            self.state.seats_occupied += 1;
            info!(
                client_id = client.id,
                seats = self.state.seats_occupied,
                "client takes a seat"
            );
            self.emit(ShopEvent::Admitted {
                client_id: client.id,
                seats_occupied: self.state.seats_occupied,
            })?;
            match self.idle_worker() {
                Some(worker_id) => self.dispatch(client, worker_id)?,
                None => self.pending.push_back(client),
            }
        } else {
            // Rejection is synchronous and final; no handoff is attempted.
            self.state.rejected += 1;
            warn!(client_id = client.id, "client turned away");
            self.emit(ShopEvent::Rejected {
                client_id: client.id,
            })?;
        }
        Ok(Step::Continue)
    }

    fn on_completion(&mut self, client_id: u64, worker_id: usize) -> Result<Step, ShopError> {
        let worker = self
            .workers
            .get_mut(worker_id)
            .ok_or(ShopError::UnknownWorker { worker_id })?;
        if !worker.busy || self.state.seats_occupied == 0 {
            return Err(ShopError::UnexpectedCompletion {
                client_id,
                phase: self.state.phase,
            });
        }
        worker.busy = false;
        self.state.seats_occupied -= 1;
        self.state.served += 1;
        info!(client_id, worker_id, "client leaves served");
        self.emit(ShopEvent::ServiceFinished {
            client_id,
            worker_id,
        })?;

        if let Some(next) = self.pending.pop_front() {
            // Clients only queue while every worker is busy, so the reporting
            // worker is the sole idle one and also the lowest-index choice.
            self.dispatch(next, worker_id)?;
        }

        if self.state.phase == Phase::Closing
            && self.state.seats_occupied == 0
            && self.pending.is_empty()
        {
            return self.close_up();
        }
        Ok(Step::Continue)
    }

    fn on_close(&mut self) -> Result<Step, ShopError> {
        if self.state.phase != Phase::Open {
            return Err(ShopError::UnexpectedClose {
                phase: self.state.phase,
            });
        }
        self.state.phase = Phase::Closing;
        info!(
            seats = self.state.seats_occupied,
            "arrival stream ended, draining"
        );
        if self.state.seats_occupied == 0 {
            return self.close_up();
        }
        Ok(Step::Continue)
    }

    /// Terminal transition: emit the summary and stop the loop.
    fn close_up(&mut self) -> Result<Step, ShopError> {
        self.state.phase = Phase::Closed;
        info!(
            served = self.state.served,
            rejected = self.state.rejected,
            "shop closed"
        );
        self.emit(ShopEvent::Summary {
            served: self.state.served,
            rejected: self.state.rejected,
        })?;
        Ok(Step::Done)
    }

    fn dispatch(&mut self, client: Client, worker_id: usize) -> Result<(), ShopError> {
        let worker = self
            .workers
            .get_mut(worker_id)
            .ok_or(ShopError::UnknownWorker { worker_id })?;
        worker
            .assignments
            .send(Assignment { client })
            .map_err(|_| ShopError::ChannelClosed("worker assignments"))?;
        worker.busy = true;
        debug!(client_id = client.id, worker_id, "client dispatched");
        self.emit(ShopEvent::ServiceStarted {
            client_id: client.id,
            worker_id,
        })
    }

    /// Lowest-indexed idle worker, if any.
    fn idle_worker(&self) -> Option<usize> {
        self.workers.iter().position(|w| !w.busy)
    }

    fn emit(&self, event: ShopEvent) -> Result<(), ShopError> {
        self.events
            .send(event)
            .map_err(|_| ShopError::ChannelClosed("event stream"))
    }
}
