//! Resolution config loader.

use std::path::Path;

use magic_core::MagicConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`MagicConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`MagicConfig::default`].
    pub fn load(path: &Path) -> LoadResult<MagicConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MagicConfig> {
        let config: MagicConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !config.smite_impulse_multiplier.is_finite() {
            anyhow::bail!(
                "smite_impulse_multiplier must be finite, got {}",
                config.smite_impulse_multiplier
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::Tick;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), MagicConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ConfigLoader::parse(
            r#"
            smite_impulse_multiplier = 500.0
            default_learn_time = 12
            rng_seed = 99
            "#,
        )
        .unwrap();

        assert_eq!(config.smite_impulse_multiplier, 500.0);
        assert_eq!(config.default_learn_time, Tick(12));
        assert_eq!(config.rng_seed, 99);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::parse("rng_seed = \"seven\"").is_err());
    }
}
