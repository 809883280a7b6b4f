//! Spellbooks and the timed gate that teaches them.
//!
//! Using a spellbook starts an interruptible do-after on the user. Only one
//! learn timer per (user, book) pair may run at a time. When the do-after
//! finishes uncancelled, the book's spells are handed to the [`SpellGrant`]
//! collaborator.

use crate::config::MagicConfig;
use crate::env::{
    DoAfterArgs, DoAfterCompletion, DoAfterFlags, DoAfterId, DoAfters, SpellGrant, WorldError,
};
use crate::state::{EntityId, SpellId, Tick};

/// Item that teaches spells when studied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spellbook {
    pub id: String,
    pub spells: Vec<SpellId>,
    /// Study time; falls back to [`MagicConfig::default_learn_time`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub learn_time: Option<Tick>,
}

impl Spellbook {
    pub fn learn_time(&self, config: &MagicConfig) -> Tick {
        self.learn_time.unwrap_or(config.default_learn_time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LearnAttempt {
    Started(DoAfterId),
    /// A learn timer for the same user and book is already running.
    AlreadyPending,
    /// The do-after collaborator refused to start (e.g. no free hand).
    Refused,
}

/// Flags every learn do-after carries.
pub const LEARN_FLAGS: DoAfterFlags = DoAfterFlags::BREAK_ON_DAMAGE
    .union(DoAfterFlags::BREAK_ON_MOVE)
    .union(DoAfterFlags::NEED_HAND);

pub struct LearnGate;

impl LearnGate {
    /// Starts studying `book` (held as entity `book_entity`).
    pub fn attempt_learn<D>(
        do_afters: &mut D,
        user: EntityId,
        book_entity: EntityId,
        book: &Spellbook,
        config: &MagicConfig,
    ) -> LearnAttempt
    where
        D: DoAfters + ?Sized,
    {
        if do_afters.has_pending(user, book_entity) {
            tracing::trace!(%user, book = %book.id, "learn already in progress");
            return LearnAttempt::AlreadyPending;
        }

        let args = DoAfterArgs {
            user,
            target: book_entity,
            delay: book.learn_time(config),
            flags: LEARN_FLAGS,
        };

        match do_afters.try_start_do_after(args) {
            Some(id) => {
                tracing::debug!(%user, book = %book.id, delay = %args.delay, "learn started");
                LearnAttempt::Started(id)
            }
            None => LearnAttempt::Refused,
        }
    }

    /// Finishes a learn do-after. Cancelled completions grant nothing.
    ///
    /// Returns the number of newly granted spells.
    pub fn complete<G>(
        grant: &mut G,
        completion: DoAfterCompletion,
        book: &Spellbook,
    ) -> Result<usize, WorldError>
    where
        G: SpellGrant + ?Sized,
    {
        if completion.cancelled {
            tracing::debug!(user = %completion.user, book = %book.id, "learn interrupted");
            return Ok(0);
        }

        let granted = grant.grant_spells(completion.user, &book.spells)?;
        tracing::debug!(user = %completion.user, book = %book.id, granted, "learn completed");
        Ok(granted)
    }
}
