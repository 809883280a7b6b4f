use crate::state::{EntityCoordinates, EntityId, MapCoordinates, MapId, TileIndex, Transform};

use super::WorldError;

/// Spatial-transform service: frames, grids, and reparenting.
pub trait Transforms {
    fn transform(&self, entity: EntityId) -> Result<Transform, WorldError>;

    /// Converts local coordinates to absolute map coordinates.
    fn to_map(&self, coordinates: EntityCoordinates) -> Result<MapCoordinates, WorldError>;

    /// Map a set of local coordinates belongs to.
    fn map_id(&self, coordinates: EntityCoordinates) -> Result<MapId, WorldError> {
        Ok(self.to_map(coordinates)?.map)
    }

    /// Root entity of a map.
    fn map_entity(&self, map: MapId) -> Result<EntityId, WorldError>;

    /// Grid covering the given map position, if any.
    fn find_grid_at(&self, at: MapCoordinates) -> Option<EntityId>;

    /// Re-expresses `coordinates` in the frame of `parent`.
    fn with_parent(
        &self,
        coordinates: EntityCoordinates,
        parent: EntityId,
    ) -> Result<EntityCoordinates, WorldError>;

    /// Index of the tile of `grid` under `coordinates`; `None` when there is
    /// no tile there.
    fn tile_at(&self, grid: EntityId, coordinates: EntityCoordinates) -> Option<TileIndex>;

    /// Centre of `tile` in the local frame of `grid`.
    fn tile_center(&self, grid: EntityId, tile: TileIndex) -> EntityCoordinates;

    /// Moves `coordinates` to the centre of the grid tile beneath it. Points
    /// off-grid are returned in the map frame unchanged.
    fn snap_to_grid(&self, coordinates: EntityCoordinates)
    -> Result<EntityCoordinates, WorldError>;

    fn set_coordinates(
        &mut self,
        entity: EntityId,
        coordinates: EntityCoordinates,
    ) -> Result<(), WorldError>;

    /// Reparents `entity` to the grid beneath it, or to its map when there is none.
    fn attach_to_grid_or_map(&mut self, entity: EntityId) -> Result<(), WorldError>;
}
