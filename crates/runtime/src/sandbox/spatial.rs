//! [`Transforms`] for the sandbox: parent chains down to a map entity.

use magic_core::{
    DoAfterFlags, EntityCoordinates, EntityId, MapCoordinates, MapId, TileIndex, Transform,
    Transforms, Vector2, WorldError,
};

use super::{Role, SandboxWorld};

fn floor_tile(position: Vector2) -> TileIndex {
    TileIndex::new(position.x.floor() as i32, position.y.floor() as i32)
}

impl SandboxWorld {
    /// Grid-local tile containing `coordinates`, whether or not it exists.
    fn local_tile(
        &self,
        grid: EntityId,
        coordinates: EntityCoordinates,
    ) -> Result<TileIndex, WorldError> {
        let local = self.with_parent(coordinates, grid)?;
        Ok(floor_tile(local.position))
    }

    /// Grid under `at`, or the map entity when the point is in open space.
    pub(crate) fn frame_at(&self, at: MapCoordinates) -> Result<EntityId, WorldError> {
        match self.find_grid_at(at) {
            Some(grid) => Ok(grid),
            None => self.map_entity(at.map),
        }
    }

    /// Whether `entity` sits on the parent chain that starts at `from`.
    fn chain_contains(&self, from: EntityId, entity: EntityId) -> bool {
        let mut current = from;
        for _ in 0..=self.entities.len() {
            if current == entity {
                return true;
            }
            match self.entities.get(&current) {
                Some(record) if !matches!(record.role, Role::Map(_)) => {
                    current = record.coordinates.parent;
                }
                _ => return false,
            }
        }
        false
    }
}

impl Transforms for SandboxWorld {
    fn transform(&self, entity: EntityId) -> Result<Transform, WorldError> {
        let record = self.record(entity)?;
        if record.role != Role::Object {
            return Err(WorldError::NoTransform(entity));
        }

        let map = self.to_map(record.coordinates)?.map;
        let grid = self
            .entities
            .get(&record.coordinates.parent)
            .filter(|parent| matches!(parent.role, Role::Grid(_)))
            .map(|_| record.coordinates.parent);

        Ok(Transform {
            coordinates: record.coordinates,
            local_rotation: record.rotation,
            map,
            grid,
        })
    }

    fn to_map(&self, coordinates: EntityCoordinates) -> Result<MapCoordinates, WorldError> {
        let mut offsets = vec![coordinates.position];
        let mut parent = coordinates.parent;

        for _ in 0..=self.entities.len() {
            let record = self.record(parent)?;
            match record.role {
                Role::Map(map) => {
                    let position = offsets
                        .into_iter()
                        .rev()
                        .reduce(|base, offset| base + offset)
                        .unwrap_or(Vector2::ZERO);
                    return Ok(MapCoordinates::new(map, position));
                }
                Role::Grid(_) | Role::Object => {
                    offsets.push(record.coordinates.position);
                    parent = record.coordinates.parent;
                }
            }
        }

        Err(WorldError::ParentCycle(coordinates.parent))
    }

    fn map_entity(&self, map: MapId) -> Result<EntityId, WorldError> {
        self.map_entity_of(map).ok_or(WorldError::MapNotFound(map))
    }

    fn find_grid_at(&self, at: MapCoordinates) -> Option<EntityId> {
        self.grids_on(at.map).find(|grid| {
            let Ok(origin) = self.to_map(EntityCoordinates::new(*grid, Vector2::ZERO)) else {
                return false;
            };
            let tile = floor_tile(at.position - origin.position);
            self.grid_tiles(*grid)
                .is_some_and(|tiles| tiles.contains(&tile))
        })
    }

    fn with_parent(
        &self,
        coordinates: EntityCoordinates,
        parent: EntityId,
    ) -> Result<EntityCoordinates, WorldError> {
        if coordinates.parent == parent {
            return Ok(coordinates);
        }

        let absolute = self.to_map(coordinates)?;
        let origin = self.to_map(EntityCoordinates::new(parent, Vector2::ZERO))?;
        Ok(EntityCoordinates::new(
            parent,
            absolute.position - origin.position,
        ))
    }

    fn tile_at(&self, grid: EntityId, coordinates: EntityCoordinates) -> Option<TileIndex> {
        let tile = self.local_tile(grid, coordinates).ok()?;
        self.grid_tiles(grid)?.contains(&tile).then_some(tile)
    }

    fn tile_center(&self, grid: EntityId, tile: TileIndex) -> EntityCoordinates {
        EntityCoordinates::new(
            grid,
            Vector2::new(tile.x as f32 + 0.5, tile.y as f32 + 0.5),
        )
    }

    fn snap_to_grid(&self, coordinates: EntityCoordinates) -> Result<EntityCoordinates, WorldError> {
        let absolute = self.to_map(coordinates)?;
        let Some(grid) = self.find_grid_at(absolute) else {
            return Ok(coordinates);
        };

        let tile = self.local_tile(grid, coordinates)?;
        Ok(self.tile_center(grid, tile))
    }

    fn set_coordinates(
        &mut self,
        entity: EntityId,
        coordinates: EntityCoordinates,
    ) -> Result<(), WorldError> {
        let before = self.to_map(self.record(entity)?.coordinates)?;

        // Targets relative to the entity or one of its children resolve against
        // the current position and land under the grid or map beneath.
        let coordinates = if self.chain_contains(coordinates.parent, entity) {
            let absolute = self.to_map(coordinates)?;
            self.with_parent(coordinates, self.frame_at(absolute)?)?
        } else {
            self.record(coordinates.parent)?;
            coordinates
        };

        self.record_mut(entity)?.coordinates = coordinates;
        self.touch();

        if self.to_map(coordinates)? != before {
            self.interrupt(entity, DoAfterFlags::BREAK_ON_MOVE);
        }
        Ok(())
    }

    fn attach_to_grid_or_map(&mut self, entity: EntityId) -> Result<(), WorldError> {
        let coordinates = self.record(entity)?.coordinates;
        let parent = self.frame_at(self.to_map(coordinates)?)?;

        let reparented = self.with_parent(coordinates, parent)?;
        self.record_mut(entity)?.coordinates = reparented;
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Blueprint;
    use magic_core::{BlueprintId, DoAfterArgs, DoAfters, EntityStore, Tick};

    fn world() -> (SandboxWorld, EntityId, EntityId) {
        let mut world = SandboxWorld::new();
        let map = world.add_map(MapId(1));
        let grid = world
            .add_grid(MapId(1), Vector2::new(10.0, 20.0), 4, 4)
            .unwrap();
        (world, map, grid)
    }

    #[test]
    fn grid_coordinates_resolve_through_origin() {
        let (world, _, grid) = world();
        let at = world
            .to_map(EntityCoordinates::new(grid, Vector2::new(1.5, 2.5)))
            .unwrap();
        assert_eq!(at, MapCoordinates::new(MapId(1), Vector2::new(11.5, 22.5)));
    }

    #[test]
    fn grid_is_found_only_over_its_tiles() {
        let (world, _, grid) = world();
        assert_eq!(
            world.find_grid_at(MapCoordinates::new(MapId(1), Vector2::new(13.9, 20.1))),
            Some(grid)
        );
        assert_eq!(
            world.find_grid_at(MapCoordinates::new(MapId(1), Vector2::new(14.1, 20.1))),
            None
        );
    }

    #[test]
    fn reparenting_preserves_map_position() {
        let (world, map, grid) = world();
        let on_map = EntityCoordinates::new(map, Vector2::new(12.25, 21.75));

        let on_grid = world.with_parent(on_map, grid).unwrap();

        assert_eq!(on_grid.parent, grid);
        assert_eq!(on_grid.position, Vector2::new(2.25, 1.75));
    }

    #[test]
    fn snapping_moves_to_tile_center() {
        let (world, map, grid) = world();
        let snapped = world
            .snap_to_grid(EntityCoordinates::new(map, Vector2::new(12.25, 21.75)))
            .unwrap();
        assert_eq!(snapped, EntityCoordinates::new(grid, Vector2::new(2.5, 1.5)));
    }

    #[test]
    fn snapping_off_grid_is_identity() {
        let (world, map, _) = world();
        let open_space = EntityCoordinates::new(map, Vector2::new(-5.0, -5.0));
        assert_eq!(world.snap_to_grid(open_space).unwrap(), open_space);
    }

    #[test]
    fn parent_cycle_is_an_error() {
        let (mut world, map, _) = world();
        world.register_blueprint("Crate", Blueprint::new());
        let looped = world
            .spawn(&BlueprintId::new("Crate"), EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap();
        world.record_mut(looped).unwrap().coordinates =
            EntityCoordinates::new(looped, Vector2::new(1.0, 0.0));

        assert_eq!(
            world.to_map(EntityCoordinates::new(looped, Vector2::ZERO)),
            Err(WorldError::ParentCycle(looped))
        );
    }

    #[test]
    fn moving_cancels_move_sensitive_do_afters_only() {
        let (mut world, map, _) = world();
        world.register_blueprint("Crate", Blueprint::new());
        let mover = world
            .spawn(&BlueprintId::new("Crate"), EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap();
        let args = |flags| DoAfterArgs {
            user: mover,
            target: map,
            delay: Tick(5),
            flags,
        };
        world.try_start_do_after(args(DoAfterFlags::BREAK_ON_MOVE)).unwrap();
        world.try_start_do_after(args(DoAfterFlags::BREAK_ON_DAMAGE)).unwrap();

        world
            .set_coordinates(mover, EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap();
        assert_eq!(world.pending_do_afters().len(), 2);

        world
            .set_coordinates(mover, EntityCoordinates::new(map, Vector2::new(1.0, 0.0)))
            .unwrap();
        assert_eq!(world.pending_do_afters().len(), 1);
        assert!(world.take_completions()[0].cancelled);
    }
}
