#![warn(missing_docs)]
//! Built-in maze controllers, the kind registry and zip persistence.
mod keyboard;
mod random;
mod registry;
mod tabular;

pub use keyboard::KeyboardController;
pub use random::RandomController;
pub use registry::{check_types, ControllerKind, ControllerRegistry};
pub use tabular::TabularController;
