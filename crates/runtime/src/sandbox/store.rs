//! [`EntityStore`] for the sandbox.

use std::collections::BTreeMap;

use magic_core::{
    BlueprintId, Component, ComponentKind, EntityCoordinates, EntityId, EntityStore, Transforms,
    WorldError,
};

use super::{EntityRecord, Role, SandboxWorld};

impl SandboxWorld {
    /// Removes an object. Children keep their map position under the grid or
    /// map beneath them and do-afters involving the object are cancelled.
    pub(crate) fn remove_object(&mut self, entity: EntityId) -> Result<(), WorldError> {
        let children: Vec<_> = self
            .entities
            .iter()
            .filter(|(id, record)| **id != entity && record.coordinates.parent == entity)
            .map(|(id, record)| (*id, record.coordinates))
            .collect();

        let mut reparented = Vec::with_capacity(children.len());
        for (child, coordinates) in children {
            let frame = self.frame_at(self.to_map(coordinates)?)?;
            reparented.push((child, self.with_parent(coordinates, frame)?));
        }

        for (child, coordinates) in reparented {
            self.record_mut(child)?.coordinates = coordinates;
        }
        self.entities.remove(&entity);
        self.cancel_do_afters_of(entity);
        self.touch();
        Ok(())
    }
}

impl EntityStore for SandboxWorld {
    fn spawn(
        &mut self,
        blueprint: &BlueprintId,
        at: EntityCoordinates,
    ) -> Result<EntityId, WorldError> {
        let components: BTreeMap<_, _> = self
            .blueprint(blueprint)
            .ok_or_else(|| WorldError::BlueprintNotFound(blueprint.clone()))?
            .components
            .iter()
            .map(|component| (component.kind(), component.clone()))
            .collect();
        self.record(at.parent)?;

        let entity = self.allocate();
        let mut record = EntityRecord::new(Role::Object, at);
        record.blueprint = Some(blueprint.clone());
        record.components = components;
        self.entities.insert(entity, record);
        self.touch();

        tracing::trace!(%entity, %blueprint, "spawned");
        Ok(entity)
    }

    fn delete(&mut self, entity: EntityId) -> Result<(), WorldError> {
        match self.entities.get(&entity).map(|record| record.role) {
            Some(Role::Object) => {}
            Some(_) => return Err(WorldError::Undeletable(entity)),
            None => return Err(WorldError::EntityNotFound(entity)),
        }

        self.remove_object(entity)
    }

    fn exists(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn component(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.entities.get(&entity)?.components.get(&kind)
    }

    fn add_component(&mut self, entity: EntityId, component: Component) -> Result<(), WorldError> {
        let record = self.record_mut(entity)?;
        if record.role != Role::Object {
            return Err(WorldError::ComponentRejected {
                entity,
                kind: component.kind(),
            });
        }

        record.components.insert(component.kind(), component);
        self.touch();
        Ok(())
    }

    fn remove_component(&mut self, entity: EntityId, kind: ComponentKind) -> Result<bool, WorldError> {
        let removed = self.record_mut(entity)?.components.remove(&kind).is_some();
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    fn entities_in_range(&self, at: EntityCoordinates, range: f32) -> Vec<EntityId> {
        let Ok(center) = self.to_map(at) else {
            return Vec::new();
        };

        self.objects()
            .filter(|entity| {
                self.map_position(*entity).is_some_and(|position| {
                    position.map == center.map
                        && (position.position - center.position).length() <= range
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Blueprint;
    use magic_core::{MapId, Vector2};

    fn world() -> (SandboxWorld, EntityId) {
        let mut world = SandboxWorld::new();
        let map = world.add_map(MapId(1));
        world.register_blueprint(
            "Crate",
            Blueprint::new().with(Component::Flammable { fire_stacks: 1.0 }),
        );
        (world, map)
    }

    #[test]
    fn spawn_copies_blueprint_components() {
        let (mut world, map) = world();
        let entity = world
            .spawn(&BlueprintId::new("Crate"), EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap();

        assert!(world.has_component(entity, ComponentKind::Flammable));
        assert_eq!(world.blueprint_of(entity), Some(&BlueprintId::new("Crate")));
    }

    #[test]
    fn unknown_blueprint_is_an_error() {
        let (mut world, map) = world();
        let err = world
            .spawn(&BlueprintId::new("Ghost"), EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap_err();
        assert_eq!(err, WorldError::BlueprintNotFound(BlueprintId::new("Ghost")));
    }

    #[test]
    fn removing_absent_component_reports_false() {
        let (mut world, map) = world();
        let entity = world
            .spawn(&BlueprintId::new("Crate"), EntityCoordinates::new(map, Vector2::ZERO))
            .unwrap();
        let before = world.mutation_count();

        assert_eq!(world.remove_component(entity, ComponentKind::Door), Ok(false));
        assert_eq!(world.mutation_count(), before);
    }

    #[test]
    fn range_query_uses_map_distance() {
        let (mut world, map) = world();
        let crate_id = BlueprintId::new("Crate");
        let near = world
            .spawn(&crate_id, EntityCoordinates::new(map, Vector2::new(1.0, 1.0)))
            .unwrap();
        world
            .spawn(&crate_id, EntityCoordinates::new(map, Vector2::new(5.0, 0.0)))
            .unwrap();

        let found = world.entities_in_range(EntityCoordinates::new(map, Vector2::ZERO), 2.0);
        assert_eq!(found, vec![near]);
    }

    #[test]
    fn deleting_a_parent_keeps_children_in_place() {
        let (mut world, map) = world();
        let crate_id = BlueprintId::new("Crate");
        let holder = world
            .spawn(&crate_id, EntityCoordinates::new(map, Vector2::new(3.0, 1.0)))
            .unwrap();
        let held = world
            .spawn(&crate_id, EntityCoordinates::new(holder, Vector2::new(0.5, 0.5)))
            .unwrap();

        world.delete(holder).unwrap();

        assert_eq!(
            world.coordinates(held),
            Some(EntityCoordinates::new(map, Vector2::new(3.5, 1.5)))
        );
    }
}
