use crate::state::{BlueprintId, Component, ComponentKind, EntityCoordinates, EntityId};

use super::WorldError;

/// Entity storage: lifetime, components, and spatial containment queries.
pub trait EntityStore {
    /// Instantiates `blueprint` at `at` and returns the new entity.
    fn spawn(
        &mut self,
        blueprint: &BlueprintId,
        at: EntityCoordinates,
    ) -> Result<EntityId, WorldError>;

    /// Deletes an entity and everything parented to it.
    fn delete(&mut self, entity: EntityId) -> Result<(), WorldError>;

    fn exists(&self, entity: EntityId) -> bool;

    fn component(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component>;

    fn has_component(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.component(entity, kind).is_some()
    }

    /// Attaches `component`, replacing any existing component of the same kind.
    fn add_component(&mut self, entity: EntityId, component: Component) -> Result<(), WorldError>;

    /// Detaches the component of `kind`. Returns `false` if it was absent.
    fn remove_component(&mut self, entity: EntityId, kind: ComponentKind)
    -> Result<bool, WorldError>;

    /// Entities whose position lies within `range` of `at` (same map only).
    fn entities_in_range(&self, at: EntityCoordinates, range: f32) -> Vec<EntityId>;
}
