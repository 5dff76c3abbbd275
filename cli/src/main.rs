//! reprobate CLI - render JSON documents within a character budget
//!
//! Reads one JSON document (or JSON Lines with `--lines`) from a file or
//! stdin and prints each document rendered in at most `--budget`
//! characters, one per line.
//!
//! Settings are layered: `--config <file.toml>` (or defaults), then the
//! environment (`REPROBATE_BUDGET`, `REPROBATE_POLICY`), then flags.

use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reprobate::{Policy, RenderConfig};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Render JSON documents within a character budget
///
/// Examples:
///   reprobate data.json                   # Render with the default budget
///   reprobate -b 40 data.json             # At most 40 characters
///   cat events.jsonl | reprobate --lines  # One rendering per input line
#[derive(Parser, Debug)]
#[command(name = "reprobate")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Input file; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Maximum characters per rendered document
    #[arg(short, long)]
    budget: Option<usize>,

    /// Budget allocation policy: greedy or even
    #[arg(short, long)]
    policy: Option<Policy>,

    /// TOML file with render settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat the input as JSON Lines, one document per line
    #[arg(short, long)]
    lines: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Config file, then environment, then flags.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
                .merge_vars(|key| std::env::var(key).ok()),
            None => RenderConfig::from_env(),
        };
        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        Ok(config)
    }

    fn reader(&self) -> Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                let file = fs::File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            _ => Ok(Box::new(BufReader::new(io::stdin()))),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "reprobate=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.render_config()?;
    tracing::debug!(budget = config.budget, policy = %config.policy, "rendering");

    let mut reader = cli.reader()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.lines {
        for (idx, line) in reader.lines().enumerate() {
            let line = line.context("failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(&line)
                .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
            writeln!(out, "{}", config.render(&doc))?;
        }
    } else {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .context("failed to read input")?;
        let doc: Value = serde_json::from_str(&input).context("invalid JSON input")?;
        writeln!(out, "{}", config.render(&doc))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}
