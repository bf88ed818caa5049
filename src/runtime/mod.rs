//! Thread spawning and wiring of a full simulation run.

pub mod simulation;

pub use simulation::run;
