//! Tabular action-value controller.
use anyhow::Result;
use mazerl_core::{
    read_archive_entry, write_archive_entry, ArchiveReader, ArchiveWriter, Controller, Direction,
    InputType, Observation, OutputType, Vec2,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;
use std::collections::BTreeMap;

const N_ACTIONS: usize = Direction::ALL.len();
const DEFAULT_LEARNING_RATE: f32 = 0.1;

#[derive(Serialize, Deserialize)]
struct Payload {
    learning_rate: f32,
    q: BTreeMap<String, [f32; N_ACTIONS]>,
}

/// Greedy controller over a table of state-keyed action values.
///
/// States are discrete observations, keyed by their formatted slot
/// values. Values are updated externally (by a trainer, out of scope)
/// through [`TabularController::update`].
pub struct TabularController {
    learning_rate: f32,
    q: BTreeMap<String, [f32; N_ACTIONS]>,
    infos: Map<String, Value>,
}

impl TabularController {
    /// Creates an empty table with the given learning rate.
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            q: BTreeMap::new(),
            infos: Map::new(),
        }
    }

    pub(crate) fn from_params(params: &Map<String, Value>) -> Result<Box<dyn Controller>> {
        let learning_rate = params
            .get("learning_rate")
            .and_then(Value::as_f64)
            .map_or(DEFAULT_LEARNING_RATE, |v| v as f32);
        Ok(Box::new(Self::new(learning_rate)))
    }

    pub(crate) fn load_from_archive(archive: &mut ArchiveReader) -> Result<Box<dyn Controller>> {
        let payload: Payload =
            serde_json::from_slice(&read_archive_entry(archive, "q_table.json")?)?;
        Ok(Box::new(Self {
            learning_rate: payload.learning_rate,
            q: payload.q,
            infos: Map::new(),
        }))
    }

    fn state_key(obs: &Observation) -> String {
        let values: Vec<String> = obs.values().iter().map(|v| format!("{:.2}", v)).collect();
        values.join(",")
    }

    /// Action values for the given observation, zero for unseen states.
    pub fn q_values(&self, obs: &Observation) -> [f32; N_ACTIONS] {
        self.q
            .get(&Self::state_key(obs))
            .copied()
            .unwrap_or([0.0; N_ACTIONS])
    }

    /// Moves the value of `action` in state `obs` towards `target` by
    /// one learning-rate step.
    pub fn update(&mut self, obs: &Observation, action: Direction, target: f32) {
        let entry = self
            .q
            .entry(Self::state_key(obs))
            .or_insert([0.0; N_ACTIONS]);
        let ix = action as usize;
        entry[ix] += self.learning_rate * (target - entry[ix]);
    }

    /// Number of states with stored values.
    pub fn len(&self) -> usize {
        self.q.len()
    }

    /// Whether the table holds no state at all.
    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

impl Controller for TabularController {
    fn act(&mut self, obs: &Observation) -> Vec2 {
        let values = self.q_values(obs);
        let mut best = 0;
        for ix in 1..N_ACTIONS {
            if values[ix] > values[best] {
                best = ix;
            }
        }
        Direction::ALL[best].as_vec()
    }

    fn input_types(&self) -> &'static [InputType] {
        &[InputType::Discrete]
    }

    fn output_types(&self) -> &'static [OutputType] {
        &[OutputType::Discrete]
    }

    fn save_to_archive(&self, archive: &mut ArchiveWriter) -> Result<()> {
        let payload = Payload {
            learning_rate: self.learning_rate,
            q: self.q.clone(),
        };
        write_archive_entry(archive, "q_table.json", &serde_json::to_vec(&payload)?)
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
    fn test_greedy_follows_updates() {
        let obs = Observation::Discrete(vec![1.0, 0.0, 0.5, 0.0]);
        let mut ctrl = TabularController::new(1.0);

        // Unseen state: ties resolve to the first action.
        assert_eq!(ctrl.act(&obs), Direction::East.as_vec());

        ctrl.update(&obs, Direction::South, 1.0);
        assert_eq!(ctrl.act(&obs), Direction::South.as_vec());

        ctrl.update(&obs, Direction::North, 2.0);
        assert_eq!(ctrl.act(&obs), Direction::North.as_vec());
        assert_eq!(ctrl.len(), 1);
    }

    #[test]
    fn test_update_follows_learning_rate() {
        let obs = Observation::Discrete(vec![0.0; 8]);
        let mut ctrl = TabularController::new(0.5);
        ctrl.update(&obs, Direction::East, 1.0);
        assert_eq!(ctrl.q_values(&obs)[0], 0.5);
        ctrl.update(&obs, Direction::East, 1.0);
        assert_eq!(ctrl.q_values(&obs)[0], 0.75);
    }

    #[test]
    fn test_states_are_distinguished() {
        let a = Observation::Discrete(vec![0.0, 1.0]);
        let b = Observation::Discrete(vec![1.0, 0.0]);
        let mut ctrl = TabularController::new(1.0);
        ctrl.update(&a, Direction::West, 1.0);
        assert_eq!(ctrl.act(&a), Direction::West.as_vec());
        assert_eq!(ctrl.act(&b), Direction::East.as_vec());
        // Reads on unseen states do not insert.
        assert_eq!(ctrl.len(), 1);

        ctrl.update(&b, Direction::South, 1.0);
        assert_eq!(ctrl.act(&b), Direction::South.as_vec());
        assert_eq!(ctrl.len(), 2);
    }
}
