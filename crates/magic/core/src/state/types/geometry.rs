//! Coordinate frames and vector math used by spell effects.
//!
//! Positions are continuous (`f32`) inside the frame of a parent entity,
//! which is either a grid or the map entity itself. Tiles are addressed by
//! integer [`TileIndex`] within a grid.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use super::common::{EntityId, MapId};

/// Two-dimensional vector in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Cardinal facing of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// True for directions whose forward axis is north/south.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Rotation in radians. `0` faces north (+y); positive angles turn
/// counter-clockwise, so a quarter turn faces west.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle(pub f32);

impl Angle {
    pub const fn new(theta: f32) -> Self {
        Self(theta)
    }

    pub fn from_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Self(0.0),
            Direction::West => Self(FRAC_PI_2),
            Direction::South => Self(2.0 * FRAC_PI_2),
            Direction::East => Self(3.0 * FRAC_PI_2),
        }
    }

    /// Unit vector the angle faces in world space.
    pub fn to_world_vec(self) -> Vector2 {
        Vector2::new(-self.0.sin(), self.0.cos())
    }

    /// Snaps the angle to the nearest cardinal direction.
    pub fn cardinal_dir(self) -> Direction {
        let theta = self.0.rem_euclid(TAU);
        let quadrant = (theta / FRAC_PI_2).round() as i32 % 4;
        match quadrant {
            0 => Direction::North,
            1 => Direction::West,
            2 => Direction::South,
            _ => Direction::East,
        }
    }
}

/// Integer tile address inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileIndex {
    pub x: i32,
    pub y: i32,
}

impl TileIndex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Position expressed in the local frame of a parent entity (grid or map).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityCoordinates {
    pub parent: EntityId,
    pub position: Vector2,
}

impl EntityCoordinates {
    pub const fn new(parent: EntityId, position: Vector2) -> Self {
        Self { parent, position }
    }

    /// Same parent, position moved by `offset`.
    pub fn offset(self, offset: Vector2) -> Self {
        Self::new(self.parent, self.position + offset)
    }
}

/// Absolute position on a map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapCoordinates {
    pub map: MapId,
    pub position: Vector2,
}

impl MapCoordinates {
    pub const fn new(map: MapId, position: Vector2) -> Self {
        Self { map, position }
    }
}

/// Snapshot of an entity's spatial state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub coordinates: EntityCoordinates,
    pub local_rotation: Angle,
    pub map: MapId,
    /// Grid the entity currently stands on, if any.
    pub grid: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_snapping_rounds_to_nearest_quadrant() {
        assert_eq!(Angle(0.0).cardinal_dir(), Direction::North);
        assert_eq!(Angle(0.7).cardinal_dir(), Direction::North);
        assert_eq!(Angle(0.8).cardinal_dir(), Direction::West);
        assert_eq!(Angle(-FRAC_PI_2).cardinal_dir(), Direction::East);
        assert_eq!(Angle(2.0 * FRAC_PI_2 + 0.1).cardinal_dir(), Direction::South);
        assert_eq!(Angle(TAU - 0.1).cardinal_dir(), Direction::North);
    }

    #[test]
    fn facing_vectors_match_direction_deltas() {
        for direction in Direction::ALL {
            let vec = Angle::from_direction(direction).to_world_vec();
            let (dx, dy) = direction.delta();
            assert!((vec.x - dx as f32).abs() < 1e-5, "{direction}: {vec:?}");
            assert!((vec.y - dy as f32).abs() < 1e-5, "{direction}: {vec:?}");
        }
    }

    #[test]
    fn normalizing_zero_vector_stays_zero() {
        assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
        let unit = Vector2::new(3.0, 4.0).normalized();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }
}
