//! Unified error type surfaced by the spell runtime.

use magic_core::{EffectError, ErrorSeverity, MagicError, SpellError, SpellId, WorldError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("spell '{0}' is not in the catalog")]
    UnknownSpell(SpellId),

    #[error("spellbook '{0}' is not in the catalog")]
    UnknownSpellbook(String),

    #[error(transparent)]
    Spell(#[from] SpellError),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    World(#[from] WorldError),
}

impl MagicError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::UnknownSpell(_) | RuntimeError::UnknownSpellbook(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::Spell(err) => err.severity(),
            RuntimeError::Effect(err) => err.severity(),
            RuntimeError::World(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::UnknownSpell(_) => "RUNTIME_UNKNOWN_SPELL",
            RuntimeError::UnknownSpellbook(_) => "RUNTIME_UNKNOWN_SPELLBOOK",
            RuntimeError::Spell(err) => err.error_code(),
            RuntimeError::Effect(err) => err.error_code(),
            RuntimeError::World(err) => err.error_code(),
        }
    }
}
