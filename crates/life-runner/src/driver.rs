//! Continuous-play driver stepping a shared simulation on a fixed interval.

use life_core::RunnerConfig;
use life_world::Simulation;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Engine handle shared between the driver and whoever else mutates it
pub type SharedSimulation = Arc<Mutex<Simulation>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The engine was observed paused
    Paused,
    /// `max_generations` steps were taken
    GenerationLimit,
    /// The cancellation future resolved
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverSummary {
    pub generations_stepped: u64,
    pub final_generation: u64,
    pub final_population: usize,
    pub stop_reason: StopReason,
}

pub struct PlayDriver {
    simulation: SharedSimulation,
    delay: Duration,
    max_generations: Option<u64>,
    report_every: u64,
}

impl PlayDriver {
    pub fn new(simulation: SharedSimulation, config: &RunnerConfig) -> Self {
        let delay = simulation.lock().delay();
        Self {
            simulation,
            delay,
            max_generations: config.max_generations,
            report_every: config.report_every,
        }
    }

    /// Step while the engine is running, until paused, limited or cancelled
    #[instrument(skip(self, cancel), fields(delay_ms = self.delay.as_millis() as u64))]
    pub async fn run<F>(&self, cancel: F) -> DriverSummary
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + self.delay, self.delay);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(cancel);

        let mut stepped = 0u64;
        let stop_reason = loop {
            if self.limit_reached(stepped) {
                break StopReason::GenerationLimit;
            }

            let outcome = tokio::select! {
                _ = &mut cancel => Some(StopReason::Cancelled),
                _ = ticker.tick() => self.tick(&mut stepped),
            };

            if let Some(reason) = outcome {
                break reason;
            }
        };

        let simulation = self.simulation.lock();
        let summary = DriverSummary {
            generations_stepped: stepped,
            final_generation: simulation.generation(),
            final_population: simulation.population(),
            stop_reason,
        };

        debug!(?summary, "Driver stopped");
        summary
    }

    fn tick(&self, stepped: &mut u64) -> Option<StopReason> {
        let mut simulation = self.simulation.lock();
        if !simulation.is_running() {
            return Some(StopReason::Paused);
        }

        let report = simulation.step();
        *stepped += 1;

        if report.generation % self.report_every == 0 {
            info!(
                event = "population_report",
                generation = report.generation,
                population = report.population,
                births = report.births,
                deaths = report.deaths,
                "Generation {}: {} cells alive",
                report.generation,
                report.population
            );
        }

        None
    }

    fn limit_reached(&self, stepped: u64) -> bool {
        self.max_generations.is_some_and(|limit| stepped >= limit)
    }
}
