//! Event types for different topics.

use magic_core::{DoAfterId, EffectReport, EntityId, SpellKind, Tick};
use serde::{Deserialize, Serialize};

/// Outcome of a cast delivered through the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpellEvent {
    /// A cast was consumed and applied.
    Resolved {
        performer: EntityId,
        report: EffectReport,
        clock: Tick,
    },

    /// A collaborator failure aborted the cast midway.
    Failed {
        performer: EntityId,
        kind: SpellKind,
        code: String,
        error: String,
        clock: Tick,
    },
}

/// Progress of spellbook studying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LearnEvent {
    Started {
        user: EntityId,
        book: String,
        id: DoAfterId,
        clock: Tick,
    },

    Completed {
        user: EntityId,
        book: String,
        granted: usize,
        clock: Tick,
    },

    /// Damage, movement or an emptied hand cut the study short.
    Interrupted {
        user: EntityId,
        book: String,
        clock: Tick,
    },

    /// The timer ran out but the spells could not be granted.
    Failed {
        user: EntityId,
        book: String,
        code: String,
        error: String,
        clock: Tick,
    },
}
