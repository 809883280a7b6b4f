//! Spell kinds, cast events, and authored spell definitions.
mod definition;
mod event;

pub use definition::{CastTarget, SpellDefinition, SpellError, SpellTemplate, TargetShape};
pub use event::{
    CastEvent, ChangeComponentsSpell, InstantSpawnSpell, KnockSpell, ProjectileSpell, SmiteSpell,
    SpellEffect, SpellKind, TeleportSpell, WorldSpawnSpell,
};
