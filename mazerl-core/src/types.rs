//! Input/output types, directions and observations.
use crate::pos::Vec2;
use serde::{Deserialize, Serialize};

/// Kind of sensory input a robot receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputType {
    /// Wall and sign slots of the current cell.
    Discrete,
    /// A square retina of normalized intensities.
    Continuous,
}

impl InputType {
    pub(crate) fn letter(self) -> char {
        match self {
            InputType::Discrete => 'D',
            InputType::Continuous => 'C',
        }
    }

    pub(crate) fn from_letter(c: char) -> Option<Self> {
        match c {
            'D' => Some(InputType::Discrete),
            'C' => Some(InputType::Continuous),
            _ => None,
        }
    }
}

/// Kind of action a robot produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputType {
    /// One of the four cardinal directions.
    Discrete,
    /// A free 2D acceleration vector.
    Continuous,
}

impl OutputType {
    pub(crate) fn letter(self) -> char {
        match self {
            OutputType::Discrete => 'D',
            OutputType::Continuous => 'C',
        }
    }

    pub(crate) fn from_letter(c: char) -> Option<Self> {
        match c {
            'D' => Some(OutputType::Discrete),
            'C' => Some(OutputType::Continuous),
            _ => None,
        }
    }
}

/// The four cardinal movement directions, in action-index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Positive x.
    East,
    /// Positive y.
    North,
    /// Negative x.
    West,
    /// Negative y.
    South,
}

impl Direction {
    /// All directions, indexable by action index.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Unit vector pointing along the direction.
    pub fn as_vec(self) -> Vec2 {
        match self {
            Direction::East => Vec2::new(1.0, 0.0),
            Direction::North => Vec2::new(0.0, 1.0),
            Direction::West => Vec2::new(-1.0, 0.0),
            Direction::South => Vec2::new(0.0, -1.0),
        }
    }
}

/// A robot's perceived state, handed to controllers.
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// Wall and sign slots of the current cell.
    Discrete(Vec<f32>),
    /// Row-major retina of side `vision`.
    Continuous {
        /// Side of the square retina.
        vision: usize,
        /// `vision * vision` intensities.
        pixels: Vec<f32>,
    },
}

impl Observation {
    /// Flat view of the observation values.
    pub fn values(&self) -> &[f32] {
        match self {
            Observation::Discrete(v) => v,
            Observation::Continuous { pixels, .. } => pixels,
        }
    }
}
