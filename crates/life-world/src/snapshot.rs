//! Serializable view of a simulation for presentation layers.

use crate::grid::Grid;
use crate::simulation::RunState;
use life_core::Result;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub generation: u64,
    pub run_state: RunState,
    pub grid: Grid,
}

impl SimulationSnapshot {
    pub fn population(&self) -> usize {
        self.grid.live_count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Simulation;
    use life_core::{Error, Position, SimulationConfig};

    #[test]
    fn test_snapshot_reflects_engine() {
        let mut sim = Simulation::new(SimulationConfig {
            seed: Some(42),
            ..SimulationConfig::with_size(5, 5)
        })
        .unwrap();
        sim.toggle(Position::new(1, 1)).unwrap();
        sim.toggle_play();

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.run_state, RunState::Running);
        assert_eq!(snapshot.population(), 1);
        assert!(snapshot.grid.cell(Position::new(1, 1)).unwrap().newly_born);
    }

    #[test]
    fn test_snapshot_json() {
        let mut sim = Simulation::with_size(4, 3).unwrap();
        sim.toggle(Position::new(3, 2)).unwrap();
        sim.step();

        let json = sim.snapshot().to_json().unwrap();
        assert!(json.contains("\"run_state\":\"Paused\""));

        let decoded = SimulationSnapshot::from_json(&json).unwrap();
        assert_eq!(decoded, sim.snapshot());
    }

    #[test]
    fn test_snapshot_with_inconsistent_grid_rejected() {
        let json = r#"{"generation":3,"run_state":"Running","grid":{"width":3,"height":3,"cells":[]}}"#;
        let err = SimulationSnapshot::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
