//! Content loaders for reading spell data from files.
//!
//! RON holds authored content (spells, spellbooks); TOML holds tuning.

pub mod config;
pub mod factory;
pub mod spellbooks;
pub mod spells;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use spellbooks::SpellbookLoader;
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
