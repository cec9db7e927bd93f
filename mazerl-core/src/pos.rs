//! Positions and 2D vectors in maze coordinates.
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A 2D vector (velocity, acceleration, action).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// Creates a vector from its components.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    pub fn null() -> Self {
        Self::default()
    }

    /// Euclidean length.
    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A continuous position; cells are unit squares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Pos {
    /// Creates a position from its coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Integer grid coordinates of the cell containing the position.
    pub fn aligned(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add<Vec2> for Pos {
    type Output = Pos;

    fn add(self, rhs: Vec2) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned() {
        assert_eq!(Pos::new(2.7, 3.2).aligned(), (2, 3));
        assert_eq!(Pos::new(0.0, 0.999).aligned(), (0, 0));
        assert_eq!(Pos::new(-0.5, 1.0).aligned(), (-1, 1));
    }

    #[test]
    fn test_vec_ops() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(Pos::new(1.0, 1.0) + v, Pos::new(4.0, 5.0));
        assert_eq!(Vec2::null().length(), 0.0);
    }
}
