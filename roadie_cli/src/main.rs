//! `roadie` - chat with Roadie in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use roadie_core::{Outcome, RoadieConfig, Session, SessionError};
use roadie_lexicon::SeededRandom;

#[derive(Debug, Parser)]
#[command(
    name = "roadie",
    about = "A rule-based chat bot that talks like a roadman and learns as it goes"
)]
struct Args {
    /// TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Knowledge-base JSON file.
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Learned-facts JSON file.
    #[arg(long)]
    learned: Option<PathBuf>,

    /// Seed reply choices for a reproducible conversation.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => RoadieConfig::load(path)?,
        None => RoadieConfig::default(),
    };
    if let Some(path) = args.knowledge {
        config.knowledge_path = path;
    }
    if let Some(path) = args.learned {
        config.learned_path = path;
    }

    let mut session = Session::open(&config).context("failed to load Roadie's memory")?;
    if let Some(seed) = args.seed {
        session = session.with_random(SeededRandom::new(seed));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some(name) = prompt(&mut lines, "Yo, what's your name, fam? ")? else {
        return Ok(());
    };
    println!("RoadmanAI: {}", session.greet(&name));

    while let Some(input) = prompt(&mut lines, &format!("{}: ", name))? {
        match session.respond(input.trim(), &name) {
            Ok(Outcome::Farewell) => {
                println!("RoadmanAI: {}", session.farewell());
                break;
            }
            Ok(outcome) => say(&outcome),
            Err(err @ SessionError::NotPersisted { .. }) => {
                say(err.outcome());
                eprintln!("error: {}", err);
            }
        }
    }

    Ok(())
}

/// Print `label`, read one line as typed. `None` on end of input.
///
/// The name line is kept verbatim since learned facts are keyed by it.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    lines.next().transpose().map_err(Into::into)
}

fn say(outcome: &Outcome) {
    if let Some(text) = outcome.text() {
        println!("RoadmanAI: {}", text);
    }
}
