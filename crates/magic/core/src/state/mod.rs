//! World-facing data types.
//!
//! The world itself (entities, grids, maps) lives behind the collaborator
//! traits in [`crate::env`]; this module only describes the values that cross
//! that boundary.
pub mod types;

pub use types::{
    Angle, BlueprintId, Component, ComponentKind, Direction, DoorState, EntityCoordinates,
    EntityId, MapCoordinates, MapId, SoundSpecifier, SpellId, Tick, TileIndex, Transform, Vector2,
};
