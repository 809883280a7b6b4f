//! Load the content directory and report what it contains.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use magic_content::ContentFactory;

/// Load and cross-check the content directory
#[derive(Parser)]
pub struct Validate {
    /// Directory holding config.toml, spells.ron and spellbooks.ron
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        let content = factory
            .load_all()
            .with_context(|| format!("Invalid content in {}", self.data_dir.display()))?;

        println!("Content: {}", factory.data_dir().display());
        println!(
            "  smite multiplier: {}, default learn time: {}, seed: {}",
            content.config.smite_impulse_multiplier,
            content.config.default_learn_time,
            content.config.rng_seed
        );

        println!("  spells ({}):", content.spells.len());
        for spell in content.spells.iter() {
            println!(
                "    {:<16} {:<18} target: {}",
                spell.id.as_str(),
                spell.effect.kind().as_ref(),
                spell.effect.target_shape()
            );
        }

        println!("  spellbooks ({}):", content.spellbooks.books.len());
        for book in &content.spellbooks.books {
            let spells: Vec<&str> = book.spells.iter().map(|id| id.as_str()).collect();
            println!(
                "    {:<16} {} ({} ticks)",
                book.id.as_str(),
                spells.join(", "),
                book.learn_time(&content.config)
            );
        }

        Ok(())
    }
}
