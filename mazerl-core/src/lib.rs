#![warn(missing_docs)]
//! Core abstractions for maze-navigating robots and their controllers.
pub mod build_data;
pub mod controller;
pub mod error;
pub mod pos;
pub mod robot;
pub mod types;

pub use build_data::{BuildData, DEFAULT_VISION};
pub use controller::{
    read_archive_entry, write_archive_entry, ArchiveReader, ArchiveWriter, Controller,
};
pub use error::CoreError;
pub use pos::{Pos, Vec2};
pub use robot::Robot;
pub use types::{Direction, InputType, Observation, OutputType};
