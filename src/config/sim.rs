//! Simulation configuration structure.

use serde::{Deserialize, Serialize};

/// Startup configuration for one simulation run.
///
/// A `waiting_capacity` of 0 is legal and well-defined: every arrival while
/// the shop is open is rejected immediately, regardless of worker count.
/// `num_clients` may also be 0, in which case the shop opens, drains nothing,
/// and closes with an empty summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of clients the arrival source will generate.
    pub num_clients: u64,
    /// Waiting-room capacity: the bound on simultaneously admitted clients,
    /// waiting and in-service alike.
    pub waiting_capacity: u32,
    /// Number of service workers. Must be at least 1.
    pub worker_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a configuration with the traditional defaults: twenty clients,
    /// four seats, one worker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            num_clients: 20,
            waiting_capacity: 4,
            worker_count: 1,
        }
    }

    /// Set the number of clients to generate.
    #[must_use]
    pub const fn with_num_clients(mut self, num_clients: u64) -> Self {
        self.num_clients = num_clients;
        self
    }

    /// Set the waiting-room capacity.
    #[must_use]
    pub const fn with_waiting_capacity(mut self, waiting_capacity: u32) -> Self {
        self.waiting_capacity = waiting_capacity;
        self
    }

    /// Set the worker pool size.
    #[must_use]
    pub const fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns a message for either a parse failure or a validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
