//! Spell catalog loader.

use std::path::Path;

use magic_core::SpawnTableEntry;

use crate::catalog::SpellCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for the spell catalog from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a [`SpellCatalog`] from a RON file.
    ///
    /// Fails if two spells share an id or a spawn row asks for more than
    /// [`SpawnTableEntry::MAX_AMOUNT`] copies.
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        let duplicates = catalog.duplicate_ids();
        if !duplicates.is_empty() {
            let ids: Vec<&str> = duplicates.iter().map(|id| id.as_str()).collect();
            anyhow::bail!("Duplicate spell ids: {}", ids.join(", "));
        }

        let oversized = catalog.oversized_spawns();
        if !oversized.is_empty() {
            let ids: Vec<&str> = oversized.iter().map(|id| id.as_str()).collect();
            anyhow::bail!(
                "Spawn amount above {} in spells: {}",
                SpawnTableEntry::MAX_AMOUNT,
                ids.join(", ")
            );
        }

        tracing::debug!(spells = catalog.len(), "loaded spell catalog");
        Ok(catalog)
    }
}
