//! Controller registry and zip-archive persistence.
use crate::{KeyboardController, RandomController, TabularController};
use anyhow::{Context, Result};
use log::debug;
use mazerl_core::{
    read_archive_entry, write_archive_entry, ArchiveReader, BuildData, Controller, CoreError,
};
use serde_json::{Map, Value};
use std::any::TypeId;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use zip::{ZipArchive, ZipWriter};

type BuildFn = fn(&Map<String, Value>) -> Result<Box<dyn Controller>>;
type LoadFn = fn(&mut ArchiveReader) -> Result<Box<dyn Controller>>;

/// A registered controller kind: how to build one from parameters and
/// how to reconstruct one from an archive.
pub struct ControllerKind {
    type_id: TypeId,
    build: BuildFn,
    load: LoadFn,
}

impl ControllerKind {
    /// Describes the controller type `C` with its build and load functions.
    pub fn new<C: Controller>(build: BuildFn, load: LoadFn) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            build,
            load,
        }
    }
}

/// Append-only mapping from lowercase kind names to controller
/// implementations.
///
/// The registry is an explicit value rather than process-global state;
/// extensions install their kinds with [`ControllerRegistry::register`]
/// before saving or loading controllers of those kinds.
pub struct ControllerRegistry {
    kinds: HashMap<String, ControllerKind>,
}

impl ControllerRegistry {
    /// A registry holding the built-in kinds `random`, `keyboard` and
    /// `tabular`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            "random",
            ControllerKind::new::<RandomController>(
                RandomController::from_params,
                RandomController::load_from_archive,
            ),
        );
        registry.register(
            "keyboard",
            ControllerKind::new::<KeyboardController>(
                KeyboardController::from_params,
                KeyboardController::load_from_archive,
            ),
        );
        registry.register(
            "tabular",
            ControllerKind::new::<TabularController>(
                TabularController::from_params,
                TabularController::load_from_archive,
            ),
        );
        registry
    }

    /// A registry with no kinds registered.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Registers a kind under the given name, lowercased.
    pub fn register(&mut self, name: &str, kind: ControllerKind) {
        self.kinds.insert(name.to_lowercase(), kind);
    }

    /// Constructs a controller of the given kind from construction
    /// parameters.
    pub fn factory(&self, kind: &str, params: &Map<String, Value>) -> Result<Box<dyn Controller>> {
        let entry = self
            .kinds
            .get(&kind.to_lowercase())
            .ok_or_else(|| CoreError::UnknownController(kind.to_string()))?;
        (entry.build)(params)
    }

    fn name_of(&self, type_id: TypeId) -> Option<&str> {
        self.kinds
            .iter()
            .find(|(_, kind)| kind.type_id == type_id)
            .map(|(name, _)| name.as_str())
    }

    /// Saves the controller under the provided path.
    ///
    /// The path is normalized to a `.zip` extension and returned. The
    /// archive holds the resolved kind name (`controller_class`), the
    /// controller's own entries, and an `infos` JSON object: the
    /// controller's metadata shallow-merged with `infos`, the caller's
    /// values winning on conflict.
    pub fn save(
        &self,
        controller: &dyn Controller,
        path: impl AsRef<Path>,
        infos: Option<Map<String, Value>>,
    ) -> Result<PathBuf> {
        let name = self
            .name_of(controller.as_any().type_id())
            .ok_or(CoreError::UnregisteredType)?
            .to_string();

        let mut path = path.as_ref().to_path_buf();
        if path.extension().map_or(true, |ext| ext != "zip") {
            path.set_extension("zip");
        }

        let file =
            File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut archive = ZipWriter::new(BufWriter::new(file));

        write_archive_entry(&mut archive, "controller_class", name.as_bytes())?;
        controller.save_to_archive(&mut archive)?;

        let mut merged = controller.infos().clone();
        if let Some(infos) = infos {
            for (key, value) in infos {
                merged.insert(key, value);
            }
        }
        write_archive_entry(&mut archive, "infos", serde_json::to_vec(&merged)?.as_slice())?;
        archive.finish()?;

        debug!("Saved controller to {:?}", path);
        Ok(path)
    }

    /// Loads a controller from the provided path.
    ///
    /// Handles any kind currently registered; when using extensions,
    /// make sure to register all kinds used when the archive was saved.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Box<dyn Controller>> {
        let path = path.as_ref();
        debug!("Loading controller from {:?}", path);

        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let name = String::from_utf8(read_archive_entry(&mut archive, "controller_class")?)?;
        debug!("> controller class: {}", name);
        let entry = self
            .kinds
            .get(&name.to_lowercase())
            .ok_or_else(|| CoreError::UnknownController(name.clone()))?;

        let mut controller = (entry.load)(&mut archive)?;
        let infos = serde_json::from_slice(&read_archive_entry(&mut archive, "infos")?)?;
        controller.set_infos(infos);
        Ok(controller)
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Ensures that the controller is compatible with the robot's configured
/// input and output types.
pub fn check_types(controller: &dyn Controller, data: &BuildData) -> Result<(), CoreError> {
    if !controller.input_types().contains(&data.inputs) {
        return Err(CoreError::IncompatibleInput(
            data.inputs,
            controller.input_types().to_vec(),
        ));
    }
    if !controller.output_types().contains(&data.outputs) {
        return Err(CoreError::IncompatibleOutput(
            data.outputs,
            controller.output_types().to_vec(),
        ));
    }
    Ok(())
}
