//! Duration sources: the injected collaborators for arrival and service timing.
//!
//! The simulation never decides how long anything takes; it asks one of these.
//! Tests inject [`FixedDelay`] for deterministic replay; realistic runs use
//! [`UniformDelay`], matching the `random * spread + base` shape of classic
//! renditions of this problem.

use std::time::Duration;

use rand::Rng;

/// A callable source of non-negative durations.
pub trait DurationSource {
    /// Draw the next duration.
    fn next(&mut self) -> Duration;
}

/// Any `FnMut() -> Duration` closure is a duration source.
impl<F> DurationSource for F
where
    F: FnMut() -> Duration,
{
    fn next(&mut self) -> Duration {
        self()
    }
}

/// A constant delay, for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(Duration);

impl FixedDelay {
    /// Create a source that always yields `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }
}

impl DurationSource for FixedDelay {
    fn next(&mut self) -> Duration {
        self.0
    }
}

/// A delay drawn uniformly from `[min, max]` on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformDelay {
    min: Duration,
    max: Duration,
}

impl UniformDelay {
    /// Create a uniform source over `[min, max]`. If the bounds are reversed
    /// they are swapped rather than rejected.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }
}

impl DurationSource for UniformDelay {
    fn next(&mut self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::rng().random_range(self.min..=self.max)
    }
}
