//! Data-driven spell content and loaders.
//!
//! This crate reads the authored side of the magic system from RON/TOML files:
//! - Spell catalog (`spells.ron`): spell ids, speech lines and effect templates
//! - Spellbooks (`spellbooks.ron`): which spells each book teaches
//! - Resolution tuning (`config.toml`)
//!
//! Content never carries cast-time inputs. Targets are supplied when a
//! [`magic_core::SpellDefinition`] is instantiated into a cast event.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{SpellCatalog, SpellbookCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, Content, ContentFactory, SpellLoader, SpellbookLoader};
