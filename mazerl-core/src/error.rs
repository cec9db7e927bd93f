//! Errors in the library.
use crate::pos::Pos;
use crate::types::{InputType, OutputType};
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Robot code rejected by the string codec.
    #[error("Malformed robot code {0:?}")]
    MalformedCode(String),

    /// Discrete inputs combined with continuous outputs.
    #[error("Incompatible hybrid mode: agents cannot have discrete inputs and continuous outputs")]
    HybridMode,

    /// Retina sizes must be odd.
    #[error("Retina size must be odd, got {0}")]
    EvenVision(usize),

    /// A controller supports several types; the caller must pick one.
    #[error("Controller can handle more than one {0} type, specify the build data explicitly")]
    AmbiguousController(&'static str),

    /// Lookup of an unregistered controller kind.
    #[error("Unknown controller kind {0:?}")]
    UnknownController(String),

    /// Reverse lookup of a controller whose type was never registered.
    #[error("Controller type is not registered")]
    UnregisteredType,

    /// Robot input type rejected by a controller.
    #[error("Input type {0:?} is not valid for this controller, expected one of {1:?}")]
    IncompatibleInput(InputType, Vec<InputType>),

    /// Robot output type rejected by a controller.
    #[error("Output type {0:?} is not valid for this controller, expected one of {1:?}")]
    IncompatibleOutput(OutputType, Vec<OutputType>),

    /// Non-finite position handed to [`Robot::reset`](crate::Robot::reset).
    #[error("Invalid position {0:?}")]
    InvalidPosition(Pos),
}
