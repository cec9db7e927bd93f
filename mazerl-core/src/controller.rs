//! Controller capability protocol and archive helpers.
use crate::pos::Vec2;
use crate::types::{InputType, Observation, OutputType};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::any::Any;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use zip::{ZipArchive, ZipWriter};

/// Archive being written during a controller save.
pub type ArchiveWriter = ZipWriter<BufWriter<File>>;

/// Archive being read during a controller load.
pub type ArchiveReader = ZipArchive<BufReader<File>>;

/// A policy mapping perceived state to an action vector.
///
/// Controller kinds are registered by string key in a
/// `ControllerRegistry`; persistence delegates the kind-specific archive
/// entries to the controller itself through [`Controller::save_to_archive`]
/// and a registered load function.
pub trait Controller: Any {
    /// Computes the action for the given observation.
    fn act(&mut self, obs: &Observation) -> Vec2;

    /// Clears transient state at the start of an episode.
    fn reset(&mut self) {}

    /// Input types this controller can consume.
    fn input_types(&self) -> &'static [InputType];

    /// Output types this controller can produce.
    fn output_types(&self) -> &'static [OutputType];

    /// Retina side for continuous inputs, when fixed by the controller.
    fn vision(&self) -> Option<usize> {
        None
    }

    /// Writes the controller's own entries into the archive.
    fn save_to_archive(&self, archive: &mut ArchiveWriter) -> Result<()>;

    /// Metadata persisted alongside the controller.
    fn infos(&self) -> &Map<String, Value>;

    /// Replaces the persisted metadata, typically after a load.
    fn set_infos(&mut self, infos: Map<String, Value>);

    /// Upcast used for registry reverse lookups and test downcasts.
    fn as_any(&self) -> &dyn Any;
}

/// Writes a named entry into the archive.
pub fn write_archive_entry(archive: &mut ArchiveWriter, name: &str, bytes: &[u8]) -> Result<()> {
    archive.start_file(name, zip::write::FileOptions::default())?;
    archive.write_all(bytes)?;
    Ok(())
}

/// Reads a named entry of the archive as raw bytes.
pub fn read_archive_entry(archive: &mut ArchiveReader, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive
        .by_name(name)
        .with_context(|| format!("Missing archive entry {:?}", name))?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
