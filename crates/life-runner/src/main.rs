//! Continuous-play runner for the Torus-Life engine.

mod driver;
mod telemetry;

use anyhow::Result;
use life_core::RunnerConfig;
use life_world::Simulation;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = RunnerConfig::load()?;

    // Initialize telemetry
    telemetry::init_telemetry(config.otel_endpoint.as_deref())?;

    info!("Starting Torus-Life runner");
    info!(
        "Grid {}x{}, {}ms per generation",
        config.simulation.width, config.simulation.height, config.simulation.delay_ms
    );

    let mut simulation = Simulation::new(config.simulation.clone())?;
    if config.start_randomized {
        simulation.randomize();
    }
    if config.start_running {
        simulation.toggle_play();
    }

    let simulation = Arc::new(Mutex::new(simulation));
    let driver = driver::PlayDriver::new(simulation.clone(), &config);
    let summary = driver.run(shutdown_signal()).await;

    info!(
        event = "run_summary",
        generations_stepped = summary.generations_stepped,
        final_generation = summary.final_generation,
        final_population = summary.final_population,
        stop_reason = ?summary.stop_reason,
        "🏁 Run complete"
    );
    debug!("Final grid:\n{}", simulation.lock().grid());

    // Shutdown telemetry
    telemetry::shutdown_telemetry();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
