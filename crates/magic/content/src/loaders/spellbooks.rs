//! Spellbook loader.

use std::path::Path;

use crate::catalog::SpellbookCatalog;
use crate::loaders::{LoadResult, read_file};

pub struct SpellbookLoader;

impl SpellbookLoader {
    pub fn load(path: &Path) -> LoadResult<SpellbookCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SpellbookCatalog> {
        let catalog: SpellbookCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spellbook RON: {}", e))?;

        for book in &catalog.books {
            if book.spells.is_empty() {
                anyhow::bail!("Spellbook '{}' teaches no spells", book.id);
            }
        }

        Ok(catalog)
    }
}
