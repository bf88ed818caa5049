//! The arrival source: a finite, ordered stream of clients followed by one
//! close signal.
//!
//! This component only ever sends; it blocks on nothing but its own delay
//! source. `Close` is guaranteed to be the last message it puts on the
//! coordinator's inbox, which is the single cross-sender ordering fact the
//! coordinator's state machine relies on.

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use tracing::info;

use crate::core::error::ShopError;
use crate::core::protocol::{Client, ShopMessage};
use crate::util::timing::DurationSource;

/// Spawn the arrival source thread.
///
/// Emits `num_clients` arrivals with ids `0..num_clients`, separated by delays
/// drawn from `arrival_delay`, then sends `Close` exactly once and exits.
///
/// # Errors
///
/// Returns an I/O error if the OS thread cannot be spawned.
pub fn spawn_arrival_source<S>(
    num_clients: u64,
    mut arrival_delay: S,
    shop: Sender<ShopMessage>,
) -> io::Result<JoinHandle<Result<(), ShopError>>>
where
    S: DurationSource + Send + 'static,
{
    thread::Builder::new()
        .name("shop-arrivals".into())
        .spawn(move || {
            for id in 0..num_clients {
                thread::sleep(arrival_delay.next());
                info!(client_id = id, "client enters the shop");
                shop.send(ShopMessage::Arrival(Client {
                    id,
                    arrival_seq: id,
                }))
                .map_err(|_| ShopError::ChannelClosed("coordinator inbox"))?;
            }
            shop.send(ShopMessage::Close)
                .map_err(|_| ShopError::ChannelClosed("coordinator inbox"))?;
            info!(num_clients, "arrival stream ended");
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::timing::FixedDelay;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    #[test]
    fn test_emits_ordered_arrivals_then_close() {
        let (tx, rx) = unbounded();
        let handle = spawn_arrival_source(3, FixedDelay::new(Duration::ZERO), tx).unwrap();
        assert!(handle.join().unwrap().is_ok());

        let messages: Vec<ShopMessage> = rx.iter().collect();
        assert_eq!(messages.len(), 4);
        for (i, msg) in messages.iter().take(3).enumerate() {
            let ShopMessage::Arrival(client) = msg else {
                panic!("expected arrival, got {msg:?}");
            };
            assert_eq!(client.id, i as u64);
            assert_eq!(client.arrival_seq, i as u64);
        }
        assert_eq!(messages[3], ShopMessage::Close);
    }

    #[test]
    fn test_zero_clients_sends_only_close() {
        let (tx, rx) = unbounded();
        let handle = spawn_arrival_source(0, FixedDelay::new(Duration::ZERO), tx).unwrap();
        assert!(handle.join().unwrap().is_ok());
        let messages: Vec<ShopMessage> = rx.iter().collect();
        assert_eq!(messages, vec![ShopMessage::Close]);
    }

    #[test]
    fn test_errors_when_coordinator_is_gone() {
        let (tx, rx) = unbounded();
        drop(rx);
        let handle = spawn_arrival_source(2, FixedDelay::new(Duration::ZERO), tx).unwrap();
        let err = handle.join().unwrap().unwrap_err();
        assert_eq!(err, ShopError::ChannelClosed("coordinator inbox"));
    }
}
