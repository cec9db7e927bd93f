//! The virtual robot: a point mass driven by a controller.
use crate::build_data::BuildData;
use crate::error::CoreError;
use crate::pos::{Pos, Vec2};

/// A robot, owned and stepped by the simulation loop.
///
/// [`Robot::reset`] must be called at the start of each episode before
/// the robot is stepped.
#[derive(Debug)]
pub struct Robot {
    data: BuildData,

    /// Current position; committed by the caller after collision checks.
    pub pos: Pos,
    /// Cell the robot was in at the previous step, used to detect
    /// cell transitions.
    pub prev_cell: (i32, i32),

    /// Current velocity.
    pub vel: Vec2,
    /// Current acceleration.
    pub acc: Vec2,

    /// Running reward over the current episode.
    pub reward: f32,
}

impl Robot {
    /// Body radius, in cell units.
    pub const RADIUS: f32 = 0.1;
    /// Velocity damping factor.
    pub const INERTIAL_LOSS: f32 = 0.5;
    /// Scale applied to controller actions.
    pub const ACCELERATION_SCALE: f32 = 0.5;

    /// Creates a robot from its build data.
    pub fn new(data: BuildData) -> Self {
        Self {
            data,
            pos: Pos::default(),
            prev_cell: (0, 0),
            vel: Vec2::null(),
            acc: Vec2::null(),
            reward: 0.0,
        }
    }

    /// The robot's build data.
    pub fn data(&self) -> &BuildData {
        &self.data
    }

    /// Reinitializes transient state at the start of an episode.
    pub fn reset(&mut self, pos: Pos) -> Result<(), CoreError> {
        if !pos.is_finite() {
            return Err(CoreError::InvalidPosition(pos));
        }
        self.pos = pos;
        self.prev_cell = pos.aligned();
        self.vel = Vec2::null();
        self.acc = Vec2::null();
        self.reward = 0.0;
        Ok(())
    }

    /// Grid coordinates of the cell currently containing the robot.
    pub fn cell(&self) -> (i32, i32) {
        self.pos.aligned()
    }

    /// Advances velocity and acceleration and proposes a new position.
    ///
    /// `pos` itself is left untouched so that the caller can run
    /// collision checks before committing the move.
    pub fn next_position(&mut self, action: Vec2, dt: f32) -> Pos {
        self.acc = action * Self::ACCELERATION_SCALE;
        self.vel = self.vel * (1.0 - Self::INERTIAL_LOSS * dt) + self.acc * dt;

        // Kill residual drift below the noise floor.
        if self.vel.length() < f32::min(0.01, Self::ACCELERATION_SCALE / 2.0) {
            self.vel = Vec2::null();
        }
        self.pos + self.vel * dt
    }
}
