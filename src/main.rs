//! Parley CLI: interactive auto-dealership assistant.
//!
//! Thin wrapper over the `parley` library crate.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use parley::{RandomChooser, Responder, ResponderConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parley: a rule-based conversational assistant with complexity-aware coaching.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PRNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file replacing the built-in tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print complexity analysis before each reply.
    #[arg(long)]
    analyze: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("parley: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match args.config {
        Some(ref path) => {
            eprintln!("Loading config from {}...", path.display());
            ResponderConfig::load(path)?
        }
        None => ResponderConfig::default(),
    };

    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    info!(seed = ?args.seed, rules = config.rules.len(), "starting conversation");
    let mut bot = Responder::new(config, RandomChooser::new(rng));

    println!("Parley: {}", bot.greet());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            writeln!(stdout, "Parley: {}", bot.farewell())?;
            break;
        }

        if args.analyze {
            let insights = bot.analyze(trimmed);
            writeln!(
                stdout,
                "[complexity {:.1} ({})] {} {}",
                insights.score,
                insights.category,
                insights.length_feedback(),
                insights.vocabulary_feedback()
            )?;
        }

        let reply = bot.respond(trimmed);
        writeln!(stdout, "Parley: {reply}")?;
        stdout.flush()?;
    }

    Ok(())
}
