//! Controller hosting an externally trained MLP policy.
use crate::mlp::{Mat, Mlp};
use anyhow::Result;
use mazerl_controllers::{ControllerKind, ControllerRegistry};
use mazerl_core::{
    read_archive_entry, write_archive_entry, ArchiveReader, ArchiveWriter, Controller, InputType,
    Observation, OutputType, Vec2,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::any::Any;

/// Kind key under which [`MlpController`] registers itself.
pub const KIND: &str = "policy";

#[derive(Serialize, Deserialize)]
struct Payload {
    vision: usize,
    mlp: Mlp,
}

/// Drives a robot with the forward pass of a fixed MLP.
///
/// Training happens elsewhere; this controller only hosts the resulting
/// weights. The retina is flattened into the input layer and the first
/// two outputs, tanh-bounded, form the acceleration vector.
pub struct MlpController {
    vision: usize,
    mlp: Mlp,
    infos: Map<String, Value>,
}

impl MlpController {
    /// Wraps trained weights for a retina of side `vision`.
    ///
    /// Panics if the network input layer does not match the retina size,
    /// or if the output layer holds fewer than the two acceleration
    /// components.
    pub fn new(mlp: Mlp, vision: usize) -> Self {
        if mlp.n_inputs() != vision * vision {
            panic!(
                "Network expects {} inputs, retina of side {} provides {}",
                mlp.n_inputs(),
                vision,
                vision * vision
            );
        }
        if mlp.n_outputs() < 2 {
            panic!(
                "Network produces {} outputs, acceleration needs 2",
                mlp.n_outputs()
            );
        }
        let mut infos = Map::new();
        infos.insert("algo".to_string(), json!("mlp"));
        infos.insert("inputs".to_string(), json!("Continuous"));
        infos.insert("outputs".to_string(), json!("Continuous"));
        infos.insert("vision".to_string(), json!(vision));
        Self { vision, mlp, infos }
    }

    fn from_params(params: &Map<String, Value>) -> Result<Box<dyn Controller>> {
        let vision = params
            .get("vision")
            .and_then(Value::as_u64)
            .map_or(mazerl_core::DEFAULT_VISION, |v| v as usize);
        let hidden: Vec<usize> = params
            .get("hidden")
            .and_then(Value::as_array)
            .map(|dims| {
                dims.iter()
                    .filter_map(Value::as_u64)
                    .map(|v| v as usize)
                    .collect()
            })
            .unwrap_or_else(|| vec![16]);

        let mut layers = vec![vision * vision];
        layers.extend(hidden);
        layers.push(2);
        Ok(Box::new(Self::new(Mlp::zeros(&layers), vision)))
    }

    fn load_from_archive(archive: &mut ArchiveReader) -> Result<Box<dyn Controller>> {
        let payload: Payload = bincode::deserialize(&read_archive_entry(archive, "policy.bin")?)?;
        Ok(Box::new(Self::new(payload.mlp, payload.vision)))
    }
}

impl Controller for MlpController {
    fn act(&mut self, obs: &Observation) -> Vec2 {
        let out = self.mlp.forward(&Mat::column(obs.values().to_vec()));
        Vec2::new(out.data()[0], out.data()[1])
    }

    fn input_types(&self) -> &'static [InputType] {
        &[InputType::Continuous]
    }

    fn output_types(&self) -> &'static [OutputType] {
        &[OutputType::Continuous]
    }

    fn vision(&self) -> Option<usize> {
        Some(self.vision)
    }

    fn save_to_archive(&self, archive: &mut ArchiveWriter) -> Result<()> {
        let payload = Payload {
            vision: self.vision,
            mlp: self.mlp.clone(),
        };
        write_archive_entry(archive, "policy.bin", &bincode::serialize(&payload)?)
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

/// Installs the [`MlpController`] kind into a registry under
/// [`KIND`](constant@KIND).
pub fn register(registry: &mut ControllerRegistry) {
    registry.register(
        KIND,
        ControllerKind::new::<MlpController>(
            MlpController::from_params,
            MlpController::load_from_archive,
        ),
    );
}
