//! Deterministic spell effect resolution.
//!
//! `magic-core` turns validated [`spell::CastEvent`]s into world mutations:
//! spawning entities, firing projectiles, teleporting, opening doors, swapping
//! components and dismembering targets. The world itself (entity store,
//! transforms, physics, chat, ...) is reached only through the collaborator
//! traits in [`env`], and every cast flows through [`system::MagicSystem`].
pub mod config;
pub mod env;
pub mod error;
pub mod learn;
pub mod spatial;
pub mod spawn;
pub mod spell;
pub mod state;
pub mod system;

mod effects;

pub use config::MagicConfig;
pub use env::{
    Audio, AudioParams, Bodies, Chat, ChatChannel, DoAfterArgs, DoAfterCompletion, DoAfterFlags,
    DoAfterId, DoAfters, Doors, EntityStore, Localization, PcgRng, Physics, Projectiles,
    RngOracle, RngStream, SpellGrant, Transforms, World, WorldError,
};
pub use error::{ErrorSeverity, MagicError};
pub use learn::{LEARN_FLAGS, LearnAttempt, LearnGate, Spellbook};
pub use spatial::{Origins, SpawnPosition, resolve_origins};
pub use spawn::{SpawnTableEntry, resolve_spawns};
pub use spell::{
    CastEvent, CastTarget, ChangeComponentsSpell, InstantSpawnSpell, KnockSpell, ProjectileSpell,
    SmiteSpell, SpellDefinition, SpellEffect, SpellError, SpellKind, SpellTemplate, TargetShape,
    TeleportSpell, WorldSpawnSpell,
};
pub use state::{
    Angle, BlueprintId, Component, ComponentKind, Direction, DoorState, EntityCoordinates,
    EntityId, MapCoordinates, MapId, SoundSpecifier, SpellId, Tick, TileIndex, Transform, Vector2,
};
pub use system::{CastOutcome, EffectError, EffectReport, MagicSystem};
