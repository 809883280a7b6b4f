//! Cast the catalog into a sandbox arena.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use magic_content::ContentFactory;
use magic_core::{
    BlueprintId, CastOutcome, EffectReport, EntityId, EntityStore, LearnAttempt, SpellDefinition,
};
use runtime::{Event, SpellRuntime, Topic};

use crate::arena::Arena;

/// Cast every catalog spell in a sandbox arena and study every spellbook
#[derive(Parser)]
pub struct Demo {
    /// Directory holding config.toml, spells.ron and spellbooks.ron
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Override the configured rng seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per cast
    Summary,
    /// Every published event as JSON
    Json,
}

impl Demo {
    pub fn execute(self) -> Result<()> {
        let mut content = ContentFactory::new(&self.data_dir)
            .load_all()
            .with_context(|| format!("Invalid content in {}", self.data_dir.display()))?;
        if let Some(seed) = self.seed {
            content.config.rng_seed = seed;
        }

        let arena = Arena::build(&content.spells)?;
        let spells: Vec<SpellDefinition> = content.spells.iter().cloned().collect();
        let books: Vec<(String, u64)> = content
            .spellbooks
            .books
            .iter()
            .map(|book| (book.id.clone(), book.learn_time(&content.config).0))
            .collect();

        let wizard = arena.wizard;
        let targets: Vec<_> = spells
            .iter()
            .map(|spell| arena.target_for(&spell.effect))
            .collect();

        let mut runtime = SpellRuntime::with_content(arena.world, content);
        let mut spell_events = runtime.subscribe(Topic::Spell);
        let mut learn_events = runtime.subscribe(Topic::Learn);

        for (spell, target) in spells.iter().zip(targets) {
            match runtime.cast_spell(wizard, &spell.id, target) {
                Ok(CastOutcome::Consumed(report)) => self.print_cast(spell, &report),
                Ok(CastOutcome::AlreadyHandled) => {}
                Err(err) => {
                    tracing::warn!(spell = %spell.id, "cast failed: {err}");
                    if matches!(self.format, OutputFormat::Summary) {
                        println!("{:<16} failed: {err}", spell.id.as_str());
                    }
                }
            }
        }

        self.study(&mut runtime, wizard, &books)?;

        if matches!(self.format, OutputFormat::Json) {
            while let Ok(event) = spell_events.try_recv() {
                print_json(&event)?;
            }
            while let Ok(event) = learn_events.try_recv() {
                print_json(&event)?;
            }
        }

        Ok(())
    }

    fn print_cast(&self, spell: &SpellDefinition, report: &EffectReport) {
        if !matches!(self.format, OutputFormat::Summary) {
            return;
        }

        let mut parts = Vec::new();
        if !report.spawned.is_empty() {
            parts.push(format!("spawned {}", report.spawned.len()));
        }
        if !report.deleted.is_empty() {
            parts.push(format!("deleted {}", report.deleted.len()));
        }
        if !report.affected.is_empty() {
            parts.push(format!("affected {}", report.affected.len()));
        }
        if !report.added.is_empty() || !report.removed.is_empty() {
            parts.push(format!("+{:?} -{:?}", report.added, report.removed));
        }
        if report.rejected {
            parts.push("rejected".to_owned());
        }
        if parts.is_empty() {
            parts.push("no effect".to_owned());
        }

        println!("{:<16} {}", spell.id.as_str(), parts.join(", "));
    }

    /// Drops a copy of each spellbook next to the wizard and studies them in turn.
    fn study(
        &self,
        runtime: &mut SpellRuntime,
        wizard: EntityId,
        books: &[(String, u64)],
    ) -> Result<()> {
        let at = runtime
            .world()
            .coordinates(wizard)
            .context("wizard vanished from the arena")?;

        for (book, learn_time) in books {
            let book_entity = runtime
                .world_mut()
                .spawn(&BlueprintId::new("Spellbook"), at)?;

            match runtime.learn(wizard, book_entity, book)? {
                LearnAttempt::Started(_) => {
                    runtime.advance(*learn_time);
                }
                attempt => tracing::warn!(%book, ?attempt, "study did not start"),
            }
        }

        if matches!(self.format, OutputFormat::Summary) {
            let known: Vec<String> = runtime
                .world()
                .known_spells(wizard)
                .iter()
                .map(|spell| spell.to_string())
                .collect();
            println!("known spells: {}", known.join(", "));
        }

        Ok(())
    }
}

fn print_json(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
