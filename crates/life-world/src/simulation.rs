//! Simulation engine owning the grid, generation counter and play state.

use crate::grid::{density, Grid};
use crate::snapshot::SimulationSnapshot;
use life_core::{Position, Result, SimulationConfig};
use rand::distributions::Bernoulli;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

/// Continuous-play state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

/// Outcome of a single generation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
}

/// One simulation session
///
/// Every mutating operation takes `&mut self`, so callers sharing an engine
/// must serialize access themselves (the runner wraps it in a mutex). The
/// engine owns no timer: a driver calls [`Simulation::step`] on a cadence of
/// [`Simulation::delay`] while [`Simulation::is_running`] holds.
pub struct Simulation {
    grid: Grid,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    density: Bernoulli,
    generation: u64,
    run_state: RunState,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let density = density(config.randomize_probability)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        info!(
            width = config.width,
            height = config.height,
            delay_ms = config.delay_ms,
            seeded = config.seed.is_some(),
            "Simulation created"
        );

        Ok(Self {
            grid,
            config,
            rng,
            density,
            generation: 0,
            run_state: RunState::Paused,
        })
    }

    /// Engine with default settings and the given grid size
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        Self::new(SimulationConfig::with_size(width, height))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Interval at which a driver should step during continuous play
    pub fn delay(&self) -> Duration {
        self.config.delay()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.grid.live_count()
    }

    /// Replace the grid with a random one; leaves generation and play state alone
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn randomize(&mut self) -> &Grid {
        self.grid = self.grid.randomized(&mut self.rng, &self.density);

        info!(
            event = "randomize",
            population = self.grid.live_count(),
            probability = self.config.randomize_probability,
            "Grid randomized"
        );
        &self.grid
    }

    /// Kill every cell and pause continuous play
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn clear(&mut self) -> &Grid {
        self.grid = self.grid.cleared();
        if self.run_state != RunState::Paused {
            debug!("Clearing a running simulation, pausing");
        }
        self.run_state = RunState::Paused;

        info!(event = "clear", "Grid cleared");
        &self.grid
    }

    /// Flip the cell at `pos`, returning whether it is now alive
    pub fn toggle(&mut self, pos: Position) -> Result<bool> {
        let alive = self.grid.toggle(pos)?;
        trace!(event = "toggle", x = pos.x, y = pos.y, alive, "Cell toggled");
        Ok(alive)
    }

    /// Live neighbors of `pos` on the torus
    pub fn neighbor_count(&self, pos: Position) -> Result<u8> {
        self.grid.neighbor_count(pos)
    }

    /// Advance one generation
    pub fn step(&mut self) -> StepReport {
        let previous_population = self.grid.live_count();
        let next = self.grid.next_generation();

        let population = next.live_count();
        let births = next.newborn_count();
        let survivors = population - births;
        let deaths = previous_population - survivors;

        self.grid = next;
        self.generation += 1;

        debug!(
            event = "step",
            generation = self.generation,
            population,
            births,
            deaths,
            "Generation computed"
        );

        StepReport {
            generation: self.generation,
            population,
            births,
            deaths,
        }
    }

    /// Switch between paused and running, returning whether now running
    pub fn toggle_play(&mut self) -> bool {
        self.run_state = match self.run_state {
            RunState::Paused => RunState::Running,
            RunState::Running => RunState::Paused,
        };

        info!(
            event = "toggle_play",
            running = self.is_running(),
            generation = self.generation,
            "Play state changed"
        );
        self.is_running()
    }

    /// Re-initialize: all-dead grid, generation 0, paused
    ///
    /// This is the only operation that resets the generation counter.
    pub fn reset(&mut self) {
        self.grid = self.grid.cleared();
        self.generation = 0;
        self.run_state = RunState::Paused;
        info!(event = "reset", "Simulation reset");
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            generation: self.generation,
            run_state: self.run_state,
            grid: self.grid.clone(),
        }
    }
}
