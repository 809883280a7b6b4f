//! Content factory for loading every content file from a data directory.

use std::path::{Path, PathBuf};

use magic_core::MagicConfig;

use crate::catalog::{SpellCatalog, SpellbookCatalog};
use crate::loaders::{ConfigLoader, LoadResult, SpellLoader, SpellbookLoader};

/// Everything loaded from one data directory.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: MagicConfig,
    pub spells: SpellCatalog,
    pub spellbooks: SpellbookCatalog,
}

/// Content factory that loads all spell content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── spells.ron
/// └── spellbooks.ron   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load resolution config from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<MagicConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config.toml, using defaults");
            return Ok(MagicConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        SpellLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load spellbooks from `spellbooks.ron`, or none if absent.
    pub fn load_spellbooks(&self) -> LoadResult<SpellbookCatalog> {
        let path = self.data_dir.join("spellbooks.ron");
        if !path.exists() {
            return Ok(SpellbookCatalog::default());
        }
        SpellbookLoader::load(&path)
    }

    /// Load and cross-check all content.
    ///
    /// Fails if a spellbook teaches a spell the catalog does not define.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let spells = self.load_spells()?;
        let spellbooks = self.load_spellbooks()?;

        let unknown = spellbooks.unknown_spells(&spells);
        if let Some((book, spell)) = unknown.first() {
            anyhow::bail!("Spellbook '{}' teaches unknown spell '{}'", book, spell);
        }

        Ok(Content {
            config,
            spells,
            spellbooks,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SPELLS: &str = r#"(spells: [
        (id: "smite", speech: Some("spell-speech-smite"), effect: Smite(delete_non_brain_parts: true)),
    ])"#;

    fn setup(files: &[(&str, &str)]) -> (TempDir, ContentFactory) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(temp_dir.path().join(name), content).unwrap();
        }
        let factory = ContentFactory::new(temp_dir.path());
        (temp_dir, factory)
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn optional_files_fall_back_to_defaults() {
        let (_temp, factory) = setup(&[("spells.ron", SPELLS)]);

        let content = factory.load_all().unwrap();

        assert_eq!(content.config, MagicConfig::default());
        assert_eq!(content.spells.len(), 1);
        assert!(content.spellbooks.books.is_empty());
    }

    #[test]
    fn missing_spell_catalog_is_an_error() {
        let (_temp, factory) = setup(&[]);
        assert!(factory.load_all().is_err());
    }

    #[test]
    fn spellbook_with_unknown_spell_is_rejected() {
        let (_temp, factory) = setup(&[
            ("spells.ron", SPELLS),
            (
                "spellbooks.ron",
                r#"(books: [(id: "wizard", spells: ["smite", "fireball"])])"#,
            ),
        ]);

        let err = factory.load_all().unwrap_err();
        assert!(err.to_string().contains("fireball"));
    }

    #[test]
    fn config_file_is_read() {
        let (_temp, factory) = setup(&[("spells.ron", SPELLS), ("config.toml", "rng_seed = 7\n")]);
        assert_eq!(factory.load_all().unwrap().config.rng_seed, 7);
    }
}
