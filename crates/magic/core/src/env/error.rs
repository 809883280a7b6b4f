//! Collaborator errors.
//!
//! Raised by world-side implementations when a request references something
//! that does not exist. Effect handlers propagate these unchanged.

use crate::error::{ErrorSeverity, MagicError};
use crate::state::{BlueprintId, ComponentKind, EntityId, MapId};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldError {
    /// Entity does not exist (or was already deleted).
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// Entity exists but carries no spatial transform.
    #[error("entity {0} has no transform")]
    NoTransform(EntityId),

    /// Blueprint is unknown to the entity store.
    #[error("blueprint '{0}' not found")]
    BlueprintNotFound(BlueprintId),

    /// Map id does not name a live map.
    #[error("map {0} not found")]
    MapNotFound(MapId),

    /// Entity refused the component (e.g. a door component on a grid).
    #[error("entity {entity} rejected component {kind}")]
    ComponentRejected { entity: EntityId, kind: ComponentKind },

    /// Maps and grids outlive every spell.
    #[error("entity {0} cannot be deleted")]
    Undeletable(EntityId),

    /// Parent chain loops back on itself instead of reaching a map.
    #[error("parent chain of entity {0} does not reach a map")]
    ParentCycle(EntityId),
}

impl MagicError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        use WorldError::*;
        match self {
            EntityNotFound(_) | BlueprintNotFound(_) | MapNotFound(_) | Undeletable(_) => {
                ErrorSeverity::Validation
            }
            NoTransform(_) | ComponentRejected { .. } | ParentCycle(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use WorldError::*;
        match self {
            EntityNotFound(_) => "WORLD_ENTITY_NOT_FOUND",
            NoTransform(_) => "WORLD_NO_TRANSFORM",
            BlueprintNotFound(_) => "WORLD_BLUEPRINT_NOT_FOUND",
            MapNotFound(_) => "WORLD_MAP_NOT_FOUND",
            ComponentRejected { .. } => "WORLD_COMPONENT_REJECTED",
            Undeletable(_) => "WORLD_UNDELETABLE",
            ParentCycle(_) => "WORLD_PARENT_CYCLE",
        }
    }
}
