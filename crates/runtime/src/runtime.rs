//! High-level spell runtime.
//!
//! [`SpellRuntime`] owns a [`SandboxWorld`], the injected rng and the loaded
//! content. It numbers casts, routes them through
//! [`magic_core::MagicSystem`], drives spellbook study through the
//! [`LearnGate`], and publishes what happened on the [`EventBus`].

use std::collections::BTreeMap;

use magic_content::{Content, SpellCatalog, SpellbookCatalog};
use magic_core::{
    CastEvent, CastOutcome, CastTarget, DoAfterId, EntityId, LearnAttempt, LearnGate,
    MagicConfig, MagicError, MagicSystem, PcgRng, RngOracle, SpellId,
};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, LearnEvent, SpellEvent, Topic};
use crate::sandbox::SandboxWorld;

/// Main runtime that resolves casts against a sandbox world.
pub struct SpellRuntime {
    world: SandboxWorld,
    rng: Box<dyn RngOracle>,
    config: MagicConfig,
    spells: SpellCatalog,
    spellbooks: SpellbookCatalog,
    bus: EventBus,
    cast_nonce: u64,
    studying: BTreeMap<DoAfterId, String>,
}

impl SpellRuntime {
    pub fn new(world: SandboxWorld, config: MagicConfig) -> Self {
        Self {
            world,
            rng: Box::new(PcgRng),
            config,
            spells: SpellCatalog::default(),
            spellbooks: SpellbookCatalog::default(),
            bus: EventBus::new(),
            cast_nonce: 0,
            studying: BTreeMap::new(),
        }
    }

    /// Runtime over `world` with everything from a content directory.
    pub fn with_content(world: SandboxWorld, content: Content) -> Self {
        Self {
            spells: content.spells,
            spellbooks: content.spellbooks,
            ..Self::new(world, content.config)
        }
    }

    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_spells(mut self, spells: SpellCatalog) -> Self {
        self.spells = spells;
        self
    }

    pub fn with_spellbooks(mut self, spellbooks: SpellbookCatalog) -> Self {
        self.spellbooks = spellbooks;
        self
    }

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SandboxWorld {
        &mut self.world
    }

    pub fn config(&self) -> &MagicConfig {
        &self.config
    }

    pub fn spells(&self) -> &SpellCatalog {
        &self.spells
    }

    /// Nonce the next cast will draw its rng stream with.
    pub fn cast_nonce(&self) -> u64 {
        self.cast_nonce
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Delivers `event` to the magic system.
    ///
    /// Consumed and failed casts advance the cast nonce so each attempt draws
    /// from a fresh rng stream. Re-delivered events leave it alone and publish
    /// nothing.
    pub fn cast(&mut self, event: &mut CastEvent) -> Result<CastOutcome> {
        let performer = event.performer;
        let kind = event.kind();
        let clock = self.world.now();

        let result = MagicSystem::new(&mut self.world, &*self.rng, &self.config)
            .with_nonce(self.cast_nonce)
            .dispatch(event);

        match result {
            Ok(CastOutcome::Consumed(report)) => {
                self.cast_nonce += 1;
                self.bus.publish(Event::Spell(SpellEvent::Resolved {
                    performer,
                    report: report.clone(),
                    clock,
                }));
                Ok(CastOutcome::Consumed(report))
            }
            Ok(CastOutcome::AlreadyHandled) => Ok(CastOutcome::AlreadyHandled),
            Err(err) => {
                self.cast_nonce += 1;
                tracing::warn!(%performer, %kind, code = err.error_code(), "cast failed: {err}");
                self.bus.publish(Event::Spell(SpellEvent::Failed {
                    performer,
                    kind,
                    code: err.error_code().to_owned(),
                    error: err.to_string(),
                    clock,
                }));
                Err(err.into())
            }
        }
    }

    /// Instantiates catalog spell `id` for `performer` and casts it.
    pub fn cast_spell(
        &mut self,
        performer: EntityId,
        id: &SpellId,
        target: CastTarget,
    ) -> Result<CastOutcome> {
        let definition = self
            .spells
            .get(id)
            .ok_or_else(|| RuntimeError::UnknownSpell(id.clone()))?;
        let mut event = definition.instantiate(performer, target)?;
        self.cast(&mut event)
    }

    /// `user` starts studying the spellbook `book` held as `book_entity`.
    pub fn learn(
        &mut self,
        user: EntityId,
        book_entity: EntityId,
        book: &str,
    ) -> Result<LearnAttempt> {
        let spellbook = self
            .spellbooks
            .get(book)
            .ok_or_else(|| RuntimeError::UnknownSpellbook(book.to_owned()))?;

        let attempt =
            LearnGate::attempt_learn(&mut self.world, user, book_entity, spellbook, &self.config);

        if let LearnAttempt::Started(id) = attempt {
            self.studying.insert(id, spellbook.id.clone());
            self.bus.publish(Event::Learn(LearnEvent::Started {
                user,
                book: spellbook.id.clone(),
                id,
                clock: self.world.now(),
            }));
        }

        Ok(attempt)
    }

    /// Advances the world by `ticks` and settles finished study timers.
    ///
    /// Returns the entities removed by timed despawn. A completion that
    /// cannot be granted is published as a failure and the rest still settle.
    pub fn advance(&mut self, ticks: u64) -> Vec<EntityId> {
        let despawned = self.world.tick(ticks);
        let clock = self.world.now();

        for completion in self.world.take_completions() {
            let Some(book_id) = self.studying.remove(&completion.id) else {
                continue;
            };
            let Some(book) = self.spellbooks.get(&book_id) else {
                continue;
            };

            if completion.cancelled {
                self.bus.publish(Event::Learn(LearnEvent::Interrupted {
                    user: completion.user,
                    book: book_id,
                    clock,
                }));
                continue;
            }

            match LearnGate::complete(&mut self.world, completion, book) {
                Ok(granted) => self.bus.publish(Event::Learn(LearnEvent::Completed {
                    user: completion.user,
                    book: book_id,
                    granted,
                    clock,
                })),
                Err(err) => {
                    tracing::warn!(
                        user = %completion.user,
                        book = %book_id,
                        code = err.error_code(),
                        "learn failed: {err}"
                    );
                    self.bus.publish(Event::Learn(LearnEvent::Failed {
                        user: completion.user,
                        book: book_id,
                        code: err.error_code().to_owned(),
                        error: err.to_string(),
                        clock,
                    }));
                }
            }
        }

        despawned
    }
}
