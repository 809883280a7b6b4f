//! Plain data types shared by every spell effect.
mod common;
mod components;
mod geometry;

pub use common::{BlueprintId, EntityId, MapId, SoundSpecifier, SpellId, Tick};
pub use components::{Component, ComponentKind, DoorState};
pub use geometry::{
    Angle, Direction, EntityCoordinates, MapCoordinates, TileIndex, Transform, Vector2,
};
