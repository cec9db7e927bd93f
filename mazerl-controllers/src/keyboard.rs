//! Keyboard-driven controller.
use anyhow::Result;
use mazerl_core::{
    ArchiveReader, ArchiveWriter, Controller, Direction, InputType, Observation, OutputType, Vec2,
};
use serde_json::{Map, Value};
use std::any::Any;

/// Replays the direction last pressed on a caller-owned input device.
///
/// The device itself (event loop, key bindings) lives outside this crate;
/// it forwards presses through [`KeyboardController::press`] and
/// [`KeyboardController::release`].
#[derive(Default)]
pub struct KeyboardController {
    current: Option<Direction>,
    infos: Map<String, Value>,
}

impl KeyboardController {
    /// Creates a controller with no key pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a direction key press.
    pub fn press(&mut self, direction: Direction) {
        self.current = Some(direction);
    }

    /// Records the release of the current key.
    pub fn release(&mut self) {
        self.current = None;
    }

    pub(crate) fn from_params(_params: &Map<String, Value>) -> Result<Box<dyn Controller>> {
        Ok(Box::new(Self::new()))
    }

    pub(crate) fn load_from_archive(_archive: &mut ArchiveReader) -> Result<Box<dyn Controller>> {
        Ok(Box::new(Self::new()))
    }
}

impl Controller for KeyboardController {
    fn act(&mut self, _obs: &Observation) -> Vec2 {
        self.current.map_or_else(Vec2::null, Direction::as_vec)
    }

    fn reset(&mut self) {
        self.current = None;
    }

    fn input_types(&self) -> &'static [InputType] {
        &[InputType::Discrete, InputType::Continuous]
    }

    fn output_types(&self) -> &'static [OutputType] {
        &[OutputType::Discrete]
    }

    // Nothing beyond the generic metadata to persist.
    fn save_to_archive(&self, _archive: &mut ArchiveWriter) -> Result<()> {
        Ok(())
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
    fn test_replays_last_press() {
        let obs = Observation::Discrete(vec![0.0; 8]);
        let mut ctrl = KeyboardController::new();
        assert_eq!(ctrl.act(&obs), Vec2::null());

        ctrl.press(Direction::North);
        assert_eq!(ctrl.act(&obs), Vec2::new(0.0, 1.0));
        assert_eq!(ctrl.act(&obs), Vec2::new(0.0, 1.0));

        ctrl.press(Direction::West);
        assert_eq!(ctrl.act(&obs), Vec2::new(-1.0, 0.0));

        ctrl.release();
        assert_eq!(ctrl.act(&obs), Vec2::null());
    }

    #[test]
    fn test_reset_clears_press() {
        let obs = Observation::Discrete(vec![0.0; 8]);
        let mut ctrl = KeyboardController::new();
        ctrl.press(Direction::South);
        ctrl.reset();
        assert_eq!(ctrl.act(&obs), Vec2::null());
    }
}
