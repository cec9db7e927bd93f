#![warn(missing_docs)]
//! MLP policy controller for maze robots, usable without a tensor backend.
mod controller;
mod mlp;

pub use controller::{register, MlpController, KIND};
pub use mlp::{Mat, Mlp};
