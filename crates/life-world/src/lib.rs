//! Toroidal Game of Life simulation engine.
//!
//! [`Grid`] holds the cells and implements neighbor counting and the
//! mutation primitives, [`rule`] is the B3/S23 transition, and
//! [`Simulation`] owns one session's grid, generation counter and play state.

pub mod grid;
pub mod rule;
pub mod simulation;
pub mod snapshot;

pub use grid::{density, Grid};
pub use simulation::{RunState, Simulation, StepReport};
pub use snapshot::SimulationSnapshot;
