//! `starlog`: inspect game journal files from the terminal.
//!
//! # Usage
//!
//! ```text
//! starlog describe Journal.2024-03-01T100000.01.log --detailed
//! starlog totals Journal.2024-03-01T100000.01.log
//! cat Journal.*.log | starlog totals
//! ```

mod report;
mod settings;

use std::{
  io::{self, Read as _},
  path::PathBuf,
};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use settings::CliConfig;
use starlog_journal::{JournalEntry, parse_many};
use starlog_state::StateBuilder;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "starlog", version, about = "Inspect game journal files")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "starlog.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print one line per event.
  Describe {
    /// Journal file; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Also print each event's detailed report.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    detailed: Option<bool>,

    /// Include events this build does not recognise.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    show_unknown: Option<bool>,
  },
  /// Fold every event into running totals and print them.
  Totals {
    /// Journal file; reads stdin when omitted.
    file: Option<PathBuf>,
  },
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let cfg = CliConfig::load(&args.config)?;

  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(cfg.level().into())
        .from_env_lossy(),
    )
    .init();

  match args.command {
    Command::Describe {
      file,
      detailed,
      show_unknown,
    } => {
      let detailed = detailed.unwrap_or(cfg.detailed);
      let show_unknown = show_unknown.unwrap_or(cfg.show_unknown);
      for entry in read_entries(file)? {
        if !show_unknown && entry.event_type.is_unknown() {
          continue;
        }
        println!("{}", report::describe_line(&entry, detailed));
      }
    }
    Command::Totals { file } => {
      let mut state = StateBuilder::new();
      state.apply_all(&read_entries(file)?);
      print!("{}", report::totals(&state));
    }
  }

  Ok(())
}

/// Decode every line of `file` (or stdin). Lines that fail to decode are
/// logged and skipped; only an unreadable input is an error.
fn read_entries(file: Option<PathBuf>) -> Result<Vec<JournalEntry>> {
  let input = match &file {
    Some(path) => std::fs::read_to_string(path)
      .with_context(|| format!("reading journal {}", path.display()))?,
    None => {
      let mut buf = String::new();
      io::stdin()
        .read_to_string(&mut buf)
        .context("reading journal from stdin")?;
      buf
    }
  };

  let mut entries = Vec::new();
  for (line, result) in parse_many(&input).into_iter().enumerate() {
    match result {
      Ok(entry) => entries.push(entry),
      Err(e) => tracing::warn!(entry = line + 1, "skipping entry: {e}"),
    }
  }
  tracing::debug!(count = entries.len(), "journal read");
  Ok(entries)
}
