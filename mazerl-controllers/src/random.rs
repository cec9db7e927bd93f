//! Uniform random controller.
use anyhow::Result;
use mazerl_core::{
    read_archive_entry, write_archive_entry, ArchiveReader, ArchiveWriter, Controller, Direction,
    InputType, Observation, OutputType, Vec2,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;

#[derive(Serialize, Deserialize)]
struct Payload {
    seed: u64,
}

/// Picks a uniformly random direction at every step, ignoring the
/// observation.
pub struct RandomController {
    seed: u64,
    rng: SmallRng,
    infos: Map<String, Value>,
}

impl RandomController {
    /// Creates a controller with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            infos: Map::new(),
        }
    }

    pub(crate) fn from_params(params: &Map<String, Value>) -> Result<Box<dyn Controller>> {
        let seed = params.get("seed").and_then(Value::as_u64).unwrap_or(0);
        Ok(Box::new(Self::new(seed)))
    }

    pub(crate) fn load_from_archive(archive: &mut ArchiveReader) -> Result<Box<dyn Controller>> {
        let payload: Payload = serde_json::from_slice(&read_archive_entry(archive, "random.json")?)?;
        Ok(Box::new(Self::new(payload.seed)))
    }
}

impl Controller for RandomController {
    fn act(&mut self, _obs: &Observation) -> Vec2 {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())].as_vec()
    }

    fn reset(&mut self) {
        self.rng = SmallRng::seed_from_u64(self.seed);
    }

    fn input_types(&self) -> &'static [InputType] {
        &[InputType::Discrete, InputType::Continuous]
    }

    fn output_types(&self) -> &'static [OutputType] {
        &[OutputType::Discrete]
    }

    fn save_to_archive(&self, archive: &mut ArchiveWriter) -> Result<()> {
        let payload = Payload { seed: self.seed };
        write_archive_entry(archive, "random.json", &serde_json::to_vec(&payload)?)
    }

    fn infos(&self) -> &Map<String, Value> {
        &self.infos
    }

    fn set_infos(&mut self, infos: Map<String, Value>) {
        self.infos = infos;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_actions() {
        let obs = Observation::Discrete(vec![0.0; 8]);
        let mut a = RandomController::new(42);
        let mut b = RandomController::new(42);
        for _ in 0..32 {
            assert_eq!(a.act(&obs), b.act(&obs));
        }
    }

    #[test]
    fn test_reset_replays_sequence() {
        let obs = Observation::Discrete(vec![0.0; 8]);
        let mut ctrl = RandomController::new(7);
        let first: Vec<_> = (0..8).map(|_| ctrl.act(&obs)).collect();
        ctrl.reset();
        let second: Vec<_> = (0..8).map(|_| ctrl.act(&obs)).collect();
        assert_eq!(first, second);
    }
}
