//! Service workers: dedicated OS threads that serve one client at a time.
//!
//! A worker blocks on its assignment channel, sleeps for the injected service
//! duration, reports the completion back to the coordinator, and goes idle
//! again. It never receives a second assignment while busy; the coordinator's
//! idle tracking enforces that. When the coordinator drops the assignment
//! sender the blocked `recv()` returns `Err` and the worker exits cleanly, so
//! shutdown needs no flags and no polling.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::core::error::ShopError;
use crate::core::protocol::{Assignment, ShopMessage};
use crate::util::timing::DurationSource;

/// Spawn one service worker thread.
///
/// `worker_id` is the worker's index in the coordinator's pool and is echoed
/// back in every completion so the coordinator can clear the right busy flag.
///
/// # Errors
///
/// Returns an I/O error if the OS thread cannot be spawned.
pub fn spawn_service_worker<S>(
    worker_id: usize,
    assignments: Receiver<Assignment>,
    shop: Sender<ShopMessage>,
    mut service_duration: S,
) -> io::Result<JoinHandle<Result<(), ShopError>>>
where
    S: DurationSource + Send + 'static,
{
    thread::Builder::new()
        .name(format!("shop-worker-{worker_id}"))
        .spawn(move || {
            debug!(worker_id, "worker clocking on");
            loop {
                let Ok(assignment) = assignments.recv() else {
                    // Assignment sender dropped: the shop is closed.
                    debug!(worker_id, "worker clocking off");
                    break;
                };
                let client_id = assignment.client.id;
                debug!(worker_id, client_id, "starting on client");
                thread::sleep(service_duration.next());
                debug!(worker_id, client_id, "finished client");
                shop.send(ShopMessage::Completion {
                    client_id,
                    worker_id,
                })
                .map_err(|_| ShopError::ChannelClosed("coordinator inbox"))?;
            }
            Ok(())
        })
}
