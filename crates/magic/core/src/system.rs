//! Dispatch gate for cast events.
//!
//! [`MagicSystem`] is the single entry point that turns a [`CastEvent`] into
//! world mutations. It borrows the world and the injected rng for the duration
//! of one dispatch, checks the event's handled flag, and routes the payload to
//! the matching handler in [`crate::effects`].

use crate::config::MagicConfig;
use crate::effects::{self, EffectContext};
use crate::env::{RngOracle, RngStream, World, WorldError};
use crate::error::{ErrorSeverity, MagicError};
use crate::spell::{CastEvent, SpellEffect, SpellKind};
use crate::state::{ComponentKind, EntityId};

/// Errors that abort a dispatch midway.
///
/// Expected "nothing to do" situations never show up here.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error(transparent)]
    World(#[from] WorldError),
}

impl MagicError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EffectError::World(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EffectError::World(err) => err.error_code(),
        }
    }
}

/// What a consumed cast did to the world.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectReport {
    pub kind: SpellKind,
    /// Entities created, in spawn order.
    pub spawned: Vec<EntityId>,
    /// Entities deleted by the effect (smite parts).
    pub deleted: Vec<EntityId>,
    /// Pre-existing entities the effect acted on.
    pub affected: Vec<EntityId>,
    pub added: Vec<ComponentKind>,
    pub removed: Vec<ComponentKind>,
    pub spoke: bool,
    /// The effect declined to act (cross-map teleport).
    pub rejected: bool,
}

impl EffectReport {
    pub fn new(kind: SpellKind) -> Self {
        Self {
            kind,
            spawned: Vec::new(),
            deleted: Vec::new(),
            affected: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
            spoke: false,
            rejected: false,
        }
    }

    /// True when the effect left the world untouched.
    pub fn is_noop(&self) -> bool {
        self.spawned.is_empty()
            && self.deleted.is_empty()
            && self.affected.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

/// Result of delivering a cast event.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    /// The event was unhandled and has now been resolved.
    Consumed(EffectReport),
    /// The event was already handled; nothing happened.
    AlreadyHandled,
}

impl CastOutcome {
    pub fn report(&self) -> Option<&EffectReport> {
        match self {
            CastOutcome::Consumed(report) => Some(report),
            CastOutcome::AlreadyHandled => None,
        }
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, CastOutcome::Consumed(_))
    }
}

/// Resolves cast events against a world.
pub struct MagicSystem<'a, W: World + ?Sized> {
    world: &'a mut W,
    rng: &'a dyn RngOracle,
    config: &'a MagicConfig,
    cast_nonce: u64,
}

impl<'a, W: World + ?Sized> MagicSystem<'a, W> {
    pub fn new(world: &'a mut W, rng: &'a dyn RngOracle, config: &'a MagicConfig) -> Self {
        Self {
            world,
            rng,
            config,
            cast_nonce: 0,
        }
    }

    /// Sequence number mixed into the rng seed of the next dispatch.
    pub fn with_nonce(mut self, cast_nonce: u64) -> Self {
        self.cast_nonce = cast_nonce;
        self
    }

    /// Delivers `event`.
    ///
    /// The event is marked handled before any mutation happens, so an error
    /// halfway through still leaves it handled; callers never re-run a
    /// partially applied cast.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures unchanged as [`EffectError::World`].
    pub fn dispatch(&mut self, event: &mut CastEvent) -> Result<CastOutcome, EffectError> {
        if !event.mark_handled() {
            tracing::trace!(performer = %event.performer, kind = %event.kind(), "cast already handled");
            return Ok(CastOutcome::AlreadyHandled);
        }

        let kind = event.kind();
        let performer = event.performer;
        let rng = RngStream::new(self.rng, self.config.rng_seed, self.cast_nonce, performer.0);
        let mut ctx = EffectContext::new(
            &mut *self.world,
            performer,
            self.config,
            rng,
            EffectReport::new(kind),
            event.speech_key(),
        );

        match &event.effect {
            SpellEffect::InstantSpawn(spell) => effects::instant_spawn::apply(&mut ctx, spell)?,
            SpellEffect::Projectile(spell) => effects::projectile::apply(&mut ctx, spell)?,
            SpellEffect::ChangeComponents(spell) => {
                effects::change_components::apply(&mut ctx, spell)?
            }
            SpellEffect::Teleport(spell) => effects::teleport::apply(&mut ctx, spell)?,
            SpellEffect::Knock(spell) => effects::knock::apply(&mut ctx, spell)?,
            SpellEffect::Smite(spell) => effects::smite::apply(&mut ctx, spell)?,
            SpellEffect::WorldSpawn(spell) => effects::world_spawn::apply(&mut ctx, spell)?,
        }

        let report = ctx.report;
        tracing::debug!(
            %performer,
            %kind,
            spawned = report.spawned.len(),
            deleted = report.deleted.len(),
            affected = report.affected.len(),
            rejected = report.rejected,
            "cast resolved"
        );

        Ok(CastOutcome::Consumed(report))
    }
}
