//! Common error infrastructure for magic-core.
//!
//! Effect handlers treat "nothing to do" situations (no origins, cross-map
//! teleport, missing body, unknown component name) as silent no-ops. Only
//! collaborator failures surface as errors, and they propagate unchanged to
//! whoever called dispatch.
//!
//! Domain errors are defined next to the code that raises them:
//! [`crate::env::WorldError`] for collaborators and
//! [`crate::system::EffectError`] for dispatch.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The cast referenced something that does not exist (entity, blueprint).
    ///
    /// Retrying the same cast will fail the same way.
    Validation,

    /// Collaborator state is inconsistent with what it reported earlier.
    ///
    /// Examples: an entity has no transform, a grid vanished mid-dispatch.
    Internal,

    /// Content asked for something the engine can never do.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all magic-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Return a stable, upper-snake-case code from `error_code`
pub trait MagicError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
