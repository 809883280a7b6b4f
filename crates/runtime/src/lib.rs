//! Runtime orchestration for spell resolution.
//!
//! This crate hosts an in-memory [`SandboxWorld`] implementing every
//! magic-core collaborator, and the [`SpellRuntime`] that casts spells into
//! it, drives spellbook study and publishes notifications.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator
//! - [`sandbox`] is the reference world used by tests and the demo binary
//! - [`events`] provides topic-based event bus for flexible event routing
pub mod error;
pub mod events;
pub mod runtime;
pub mod sandbox;

pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, LearnEvent, SpellEvent, Topic};
pub use runtime::SpellRuntime;
pub use sandbox::{Blueprint, ChatLine, Launch, PlayedSound, SandboxLog, SandboxWorld};
