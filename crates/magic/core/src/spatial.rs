//! Spawn-origin geometry.
//!
//! Translates a declarative [`SpawnPosition`] into concrete coordinates
//! relative to the caster. An empty result is a valid answer: the effect
//! simply spawns nothing.

use arrayvec::ArrayVec;

use crate::env::Transforms;
use crate::state::{EntityCoordinates, Transform};

/// Most origins any spawn position can yield (the in-front row).
pub const MAX_ORIGINS: usize = 3;

pub type Origins = ArrayVec<EntityCoordinates, MAX_ORIGINS>;

/// Where an instant or projectile effect originates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnPosition {
    /// On the caster.
    #[default]
    AtCaster,
    /// The tile ahead of the caster and its two lateral neighbours.
    InFrontOfCaster,
}

/// Resolves the origins of an effect for a caster with transform `caster`.
///
/// `InFrontOfCaster` returns `[ahead, ahead + lateral, ahead - lateral]`, where
/// the lateral axis is east-west for a north/south facing and north-south for
/// an east/west facing. Intercardinal rotations are snapped to the nearest
/// cardinal first. Off-grid casters and missing forward tiles yield nothing.
pub fn resolve_origins<T>(transforms: &T, caster: &Transform, position: SpawnPosition) -> Origins
where
    T: Transforms + ?Sized,
{
    let mut origins = Origins::new();

    match position {
        SpawnPosition::AtCaster => {
            origins.push(caster.coordinates);
        }
        SpawnPosition::InFrontOfCaster => {
            let facing = caster.local_rotation.to_world_vec().normalized();
            let ahead = caster.coordinates.offset(facing);

            let Some(grid) = caster.grid else {
                tracing::trace!("caster is not on a grid, no in-front origins");
                return origins;
            };

            let Some(tile) = transforms.tile_at(grid, ahead) else {
                tracing::trace!(?ahead, "no tile ahead of caster, no in-front origins");
                return origins;
            };

            let (plus, minus) = if caster.local_rotation.cardinal_dir().is_vertical() {
                (tile.offset(1, 0), tile.offset(-1, 0))
            } else {
                (tile.offset(0, 1), tile.offset(0, -1))
            };

            origins.push(transforms.tile_center(grid, tile));
            origins.push(transforms.tile_center(grid, plus));
            origins.push(transforms.tile_center(grid, minus));
        }
    }

    origins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WorldError;
    use crate::state::{
        Angle, Direction, EntityId, MapCoordinates, MapId, TileIndex, Vector2,
    };

    const GRID: EntityId = EntityId(1);

    /// Single grid whose origin coincides with the map origin; tiles exist
    /// for `0..size` on both axes.
    struct SquareGrid {
        size: i32,
    }

    impl Transforms for SquareGrid {
        fn transform(&self, entity: EntityId) -> Result<Transform, WorldError> {
            Err(WorldError::EntityNotFound(entity))
        }

        fn to_map(&self, coordinates: EntityCoordinates) -> Result<MapCoordinates, WorldError> {
            Ok(MapCoordinates::new(MapId(1), coordinates.position))
        }

        fn map_entity(&self, _map: MapId) -> Result<EntityId, WorldError> {
            Ok(EntityId(0))
        }

        fn find_grid_at(&self, _at: MapCoordinates) -> Option<EntityId> {
            Some(GRID)
        }

        fn with_parent(
            &self,
            coordinates: EntityCoordinates,
            parent: EntityId,
        ) -> Result<EntityCoordinates, WorldError> {
            Ok(EntityCoordinates::new(parent, coordinates.position))
        }

        fn tile_at(&self, _grid: EntityId, coordinates: EntityCoordinates) -> Option<TileIndex> {
            let x = coordinates.position.x.floor() as i32;
            let y = coordinates.position.y.floor() as i32;
            let inside = (0..self.size).contains(&x) && (0..self.size).contains(&y);
            inside.then_some(TileIndex::new(x, y))
        }

        fn tile_center(&self, grid: EntityId, tile: TileIndex) -> EntityCoordinates {
            EntityCoordinates::new(grid, Vector2::new(tile.x as f32 + 0.5, tile.y as f32 + 0.5))
        }

        fn snap_to_grid(
            &self,
            coordinates: EntityCoordinates,
        ) -> Result<EntityCoordinates, WorldError> {
            Ok(coordinates)
        }

        fn set_coordinates(
            &mut self,
            entity: EntityId,
            _coordinates: EntityCoordinates,
        ) -> Result<(), WorldError> {
            Err(WorldError::EntityNotFound(entity))
        }

        fn attach_to_grid_or_map(&mut self, entity: EntityId) -> Result<(), WorldError> {
            Err(WorldError::EntityNotFound(entity))
        }
    }

    fn caster_at(x: f32, y: f32, facing: Angle, grid: Option<EntityId>) -> Transform {
        Transform {
            coordinates: EntityCoordinates::new(GRID, Vector2::new(x, y)),
            local_rotation: facing,
            map: MapId(1),
            grid,
        }
    }

    fn centers(origins: &Origins) -> Vec<(f32, f32)> {
        origins
            .iter()
            .map(|c| (c.position.x, c.position.y))
            .collect()
    }

    #[test]
    fn at_caster_yields_caster_position() {
        let grid = SquareGrid { size: 8 };
        let caster = caster_at(2.5, 3.5, Angle(1.0), Some(GRID));

        let origins = resolve_origins(&grid, &caster, SpawnPosition::AtCaster);

        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0], caster.coordinates);
    }

    #[test]
    fn in_front_facing_north_spreads_east_west() {
        let grid = SquareGrid { size: 8 };
        let caster = caster_at(
            3.5,
            3.5,
            Angle::from_direction(Direction::North),
            Some(GRID),
        );

        let origins = resolve_origins(&grid, &caster, SpawnPosition::InFrontOfCaster);

        assert_eq!(
            centers(&origins),
            vec![(3.5, 4.5), (4.5, 4.5), (2.5, 4.5)]
        );
    }

    #[test]
    fn in_front_facing_east_spreads_north_south() {
        let grid = SquareGrid { size: 8 };
        let caster = caster_at(
            3.5,
            3.5,
            Angle::from_direction(Direction::East),
            Some(GRID),
        );

        let origins = resolve_origins(&grid, &caster, SpawnPosition::InFrontOfCaster);

        assert_eq!(
            centers(&origins),
            vec![(4.5, 3.5), (4.5, 4.5), (4.5, 2.5)]
        );
    }

    #[test]
    fn in_front_off_grid_is_empty() {
        let grid = SquareGrid { size: 4 };
        let caster = caster_at(
            3.5,
            3.5,
            Angle::from_direction(Direction::North),
            Some(GRID),
        );

        let origins = resolve_origins(&grid, &caster, SpawnPosition::InFrontOfCaster);

        assert!(origins.is_empty());
    }

    #[test]
    fn in_front_without_grid_is_empty() {
        let grid = SquareGrid { size: 8 };
        let caster = caster_at(3.5, 3.5, Angle(0.0), None);

        let origins = resolve_origins(&grid, &caster, SpawnPosition::InFrontOfCaster);

        assert!(origins.is_empty());
    }
}
