//! Cast events: one validated intent to execute a specific spell kind.

use std::collections::BTreeMap;

use crate::spatial::SpawnPosition;
use crate::spawn::SpawnTableEntry;
use crate::state::{
    BlueprintId, Component, EntityCoordinates, EntityId, SoundSpecifier, Vector2,
};

/// Spawns `prototype` at each origin resolved around the caster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantSpawnSpell {
    pub prototype: BlueprintId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: SpawnPosition,
    /// Spawned entities ignore collisions with the performer.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub prevent_collide_with_caster: bool,
}

/// Launches `prototype` from each origin towards `target`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileSpell {
    pub prototype: BlueprintId,
    pub position: SpawnPosition,
    pub target: EntityCoordinates,
}

/// Removes and adds components on `target`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeComponentsSpell {
    pub target: EntityId,
    /// Component kind names; unknown names are ignored.
    pub to_remove: Vec<String>,
    /// Prototype components cloned onto the target unless already present.
    pub to_add: BTreeMap<String, Component>,
}

/// Moves the performer to `target` on the same map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportSpell {
    pub target: EntityCoordinates,
    pub sound: Option<SoundSpecifier>,
    pub volume: f32,
}

/// Unbolts and opens every door within `range` of the performer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnockSpell {
    pub range: f32,
    pub sound: Option<SoundSpecifier>,
    pub volume: f32,
}

/// Flings and dismembers `target`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmiteSpell {
    pub target: EntityId,
    /// Delete every resulting body part except the brain.
    pub delete_non_brain_parts: bool,
}

/// Spawns a resolved spawn table at `target`, stepping by `offset`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSpawnSpell {
    pub contents: Vec<SpawnTableEntry>,
    pub target: EntityCoordinates,
    /// Seconds before each spawned entity despawns itself.
    pub lifetime: Option<f32>,
    pub offset: Vector2,
}

/// Payload of a cast, one variant per spell kind.
#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(
    name(SpellKind),
    derive(Hash, strum::Display, strum::AsRefStr),
    strum(serialize_all = "snake_case"),
    cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    InstantSpawn(InstantSpawnSpell),
    Projectile(ProjectileSpell),
    ChangeComponents(ChangeComponentsSpell),
    Teleport(TeleportSpell),
    Knock(KnockSpell),
    Smite(SmiteSpell),
    WorldSpawn(WorldSpawnSpell),
}

impl SpellEffect {
    pub fn kind(&self) -> SpellKind {
        SpellKind::from(self)
    }
}

/// A validated cast travelling through dispatch.
///
/// The handled flag is private: it only ever moves from `false` to `true`,
/// and only [`crate::system::MagicSystem::dispatch`] moves it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastEvent {
    pub performer: EntityId,
    /// Localization key spoken by the performer; blank means silent.
    pub speech: Option<String>,
    pub effect: SpellEffect,
    #[cfg_attr(feature = "serde", serde(skip))]
    handled: bool,
}

impl CastEvent {
    pub fn new(performer: EntityId, effect: SpellEffect) -> Self {
        Self {
            performer,
            speech: None,
            effect,
            handled: false,
        }
    }

    pub fn with_speech(mut self, speech: impl Into<String>) -> Self {
        self.speech = Some(speech.into());
        self
    }

    pub fn kind(&self) -> SpellKind {
        self.effect.kind()
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Marks the event handled. Returns `false` if it already was.
    pub(crate) fn mark_handled(&mut self) -> bool {
        !std::mem::replace(&mut self.handled, true)
    }

    /// Speech key, if present and not blank.
    pub fn speech_key(&self) -> Option<&str> {
        self.speech
            .as_deref()
            .map(str::trim)
            .filter(|speech| !speech.is_empty())
    }
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knock() -> CastEvent {
        CastEvent::new(
            EntityId(1),
            SpellEffect::Knock(KnockSpell {
                range: 4.0,
                sound: None,
                volume: 0.0,
            }),
        )
    }

    #[test]
    fn handled_flag_flips_once() {
        let mut event = knock();
        assert!(!event.is_handled());
        assert!(event.mark_handled());
        assert!(event.is_handled());
        assert!(!event.mark_handled());
        assert!(event.is_handled());
    }

    #[test]
    fn blank_speech_is_silent() {
        assert_eq!(knock().speech_key(), None);
        assert_eq!(knock().with_speech("   ").speech_key(), None);
        assert_eq!(
            knock().with_speech("spell-speech-knock").speech_key(),
            Some("spell-speech-knock")
        );
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(knock().kind(), SpellKind::Knock);
        assert_eq!(SpellKind::ChangeComponents.to_string(), "change_components");
    }
}
