//! Command-line entry point for the spell engine.
//!
//! Run with: `cargo run -p magic-cli -- <command>`

mod arena;
mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Demo, Validate};

/// Spell resolution tools
#[derive(Parser)]
#[command(name = "magic")]
#[command(about = "Validate spell content and run it against a sandbox world", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and cross-check the content directory
    Validate(Validate),

    /// Cast every catalog spell in a sandbox arena and study every spellbook
    Demo(Demo),
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Demo(cmd) => cmd.execute(),
    }
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
