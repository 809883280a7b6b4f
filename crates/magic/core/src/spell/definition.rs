//! Spell content: reusable templates that become [`CastEvent`]s at cast time.
//!
//! Templates carry everything authored in content files. The cast-time inputs
//! (clicked coordinates, targeted entity) arrive as a [`CastTarget`] and are
//! merged in by [`SpellDefinition::instantiate`].

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, MagicError};
use crate::spatial::SpawnPosition;
use crate::spawn::SpawnTableEntry;
use crate::state::{
    BlueprintId, Component, EntityCoordinates, EntityId, SoundSpecifier, SpellId, Vector2,
};

use super::event::{
    CastEvent, ChangeComponentsSpell, InstantSpawnSpell, KnockSpell, ProjectileSpell, SmiteSpell,
    SpellEffect, SpellKind, TeleportSpell, WorldSpawnSpell,
};

/// What the player pointed at when casting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastTarget {
    /// Instant spells (self-cast).
    None,
    Entity(EntityId),
    Coordinates(EntityCoordinates),
}

/// Shape of target a template expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TargetShape {
    None,
    Entity,
    Coordinates,
}

impl CastTarget {
    pub fn shape(&self) -> TargetShape {
        match self {
            CastTarget::None => TargetShape::None,
            CastTarget::Entity(_) => TargetShape::Entity,
            CastTarget::Coordinates(_) => TargetShape::Coordinates,
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpellError {
    #[error("spell '{spell}' expects a {expected} target, got {actual}")]
    CastTargetMismatch {
        spell: SpellId,
        expected: TargetShape,
        actual: TargetShape,
    },
}

impl MagicError for SpellError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SpellError::CastTargetMismatch { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpellError::CastTargetMismatch { .. } => "SPELL_CAST_TARGET_MISMATCH",
        }
    }
}

/// Authored part of a spell effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellTemplate {
    InstantSpawn {
        prototype: BlueprintId,
        #[cfg_attr(feature = "serde", serde(default))]
        position: SpawnPosition,
        #[cfg_attr(feature = "serde", serde(default = "default_true"))]
        prevent_collide_with_caster: bool,
    },
    Projectile {
        prototype: BlueprintId,
        #[cfg_attr(feature = "serde", serde(default))]
        position: SpawnPosition,
    },
    ChangeComponents {
        #[cfg_attr(feature = "serde", serde(default))]
        to_remove: Vec<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        to_add: BTreeMap<String, Component>,
    },
    Teleport {
        #[cfg_attr(feature = "serde", serde(default))]
        sound: Option<SoundSpecifier>,
        #[cfg_attr(feature = "serde", serde(default))]
        volume: f32,
    },
    Knock {
        range: f32,
        #[cfg_attr(feature = "serde", serde(default))]
        sound: Option<SoundSpecifier>,
        #[cfg_attr(feature = "serde", serde(default))]
        volume: f32,
    },
    Smite {
        #[cfg_attr(feature = "serde", serde(default))]
        delete_non_brain_parts: bool,
    },
    WorldSpawn {
        contents: Vec<SpawnTableEntry>,
        #[cfg_attr(feature = "serde", serde(default))]
        lifetime: Option<f32>,
        #[cfg_attr(feature = "serde", serde(default))]
        offset: Vector2,
    },
}

impl SpellTemplate {
    pub fn kind(&self) -> SpellKind {
        match self {
            SpellTemplate::InstantSpawn { .. } => SpellKind::InstantSpawn,
            SpellTemplate::Projectile { .. } => SpellKind::Projectile,
            SpellTemplate::ChangeComponents { .. } => SpellKind::ChangeComponents,
            SpellTemplate::Teleport { .. } => SpellKind::Teleport,
            SpellTemplate::Knock { .. } => SpellKind::Knock,
            SpellTemplate::Smite { .. } => SpellKind::Smite,
            SpellTemplate::WorldSpawn { .. } => SpellKind::WorldSpawn,
        }
    }

    pub fn target_shape(&self) -> TargetShape {
        match self {
            SpellTemplate::InstantSpawn { .. } | SpellTemplate::Knock { .. } => TargetShape::None,
            SpellTemplate::ChangeComponents { .. } | SpellTemplate::Smite { .. } => {
                TargetShape::Entity
            }
            SpellTemplate::Projectile { .. }
            | SpellTemplate::Teleport { .. }
            | SpellTemplate::WorldSpawn { .. } => TargetShape::Coordinates,
        }
    }
}

/// A named spell as authored in content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speech: Option<String>,
    pub effect: SpellTemplate,
}

impl SpellDefinition {
    /// Builds the cast event for `performer` aiming at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::CastTargetMismatch`] when `target` does not have
    /// the shape the template expects.
    pub fn instantiate(
        &self,
        performer: EntityId,
        target: CastTarget,
    ) -> Result<CastEvent, SpellError> {
        let mismatch = || SpellError::CastTargetMismatch {
            spell: self.id.clone(),
            expected: self.effect.target_shape(),
            actual: target.shape(),
        };

        let effect = match (&self.effect, target) {
            (
                SpellTemplate::InstantSpawn {
                    prototype,
                    position,
                    prevent_collide_with_caster,
                },
                CastTarget::None,
            ) => SpellEffect::InstantSpawn(InstantSpawnSpell {
                prototype: prototype.clone(),
                position: *position,
                prevent_collide_with_caster: *prevent_collide_with_caster,
            }),
            (
                SpellTemplate::Projectile {
                    prototype,
                    position,
                },
                CastTarget::Coordinates(target),
            ) => SpellEffect::Projectile(ProjectileSpell {
                prototype: prototype.clone(),
                position: *position,
                target,
            }),
            (SpellTemplate::ChangeComponents { to_remove, to_add }, CastTarget::Entity(target)) => {
                SpellEffect::ChangeComponents(ChangeComponentsSpell {
                    target,
                    to_remove: to_remove.clone(),
                    to_add: to_add.clone(),
                })
            }
            (SpellTemplate::Teleport { sound, volume }, CastTarget::Coordinates(target)) => {
                SpellEffect::Teleport(TeleportSpell {
                    target,
                    sound: sound.clone(),
                    volume: *volume,
                })
            }
            (
                SpellTemplate::Knock {
                    range,
                    sound,
                    volume,
                },
                CastTarget::None,
            ) => SpellEffect::Knock(KnockSpell {
                range: *range,
                sound: sound.clone(),
                volume: *volume,
            }),
            (
                SpellTemplate::Smite {
                    delete_non_brain_parts,
                },
                CastTarget::Entity(target),
            ) => SpellEffect::Smite(SmiteSpell {
                target,
                delete_non_brain_parts: *delete_non_brain_parts,
            }),
            (
                SpellTemplate::WorldSpawn {
                    contents,
                    lifetime,
                    offset,
                },
                CastTarget::Coordinates(target),
            ) => SpellEffect::WorldSpawn(WorldSpawnSpell {
                contents: contents.clone(),
                target,
                lifetime: *lifetime,
                offset: *offset,
            }),
            _ => return Err(mismatch()),
        };

        let mut event = CastEvent::new(performer, effect);
        event.speech = self.speech.clone();
        Ok(event)
    }
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smite() -> SpellDefinition {
        SpellDefinition {
            id: SpellId::new("smite"),
            speech: Some("spell-speech-smite".into()),
            effect: SpellTemplate::Smite {
                delete_non_brain_parts: true,
            },
        }
    }

    #[test]
    fn instantiate_merges_cast_target() {
        let event = smite()
            .instantiate(EntityId(1), CastTarget::Entity(EntityId(9)))
            .unwrap();

        assert_eq!(event.performer, EntityId(1));
        assert_eq!(event.speech_key(), Some("spell-speech-smite"));
        assert!(!event.is_handled());
        match event.effect {
            SpellEffect::Smite(smite) => {
                assert_eq!(smite.target, EntityId(9));
                assert!(smite.delete_non_brain_parts);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn instantiate_rejects_wrong_target_shape() {
        let err = smite()
            .instantiate(EntityId(1), CastTarget::None)
            .unwrap_err();

        assert_eq!(
            err,
            SpellError::CastTargetMismatch {
                spell: SpellId::new("smite"),
                expected: TargetShape::Entity,
                actual: TargetShape::None,
            }
        );
        assert_eq!(err.error_code(), "SPELL_CAST_TARGET_MISMATCH");
    }

    #[test]
    fn template_kind_matches_instantiated_kind() {
        let knock = SpellDefinition {
            id: SpellId::new("knock"),
            speech: None,
            effect: SpellTemplate::Knock {
                range: 4.0,
                sound: None,
                volume: 0.0,
            },
        };

        let event = knock.instantiate(EntityId(1), CastTarget::None).unwrap();
        assert_eq!(event.kind(), knock.effect.kind());
    }
}
