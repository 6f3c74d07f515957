//! `cinesphere`: Console ticket booking for the CineSphere theater chain.
//!
//! # Usage
//!
//! ```
//! cinesphere
//! cinesphere --data-file /var/lib/cinesphere/bookings.txt
//! cinesphere list --json
//! ```
//!
//! Settings come from `cinesphere.toml` (or `--config`), then `CINESPHERE_*`
//! environment variables, then flags.

mod app;
mod prompt;
mod render;

#[cfg(test)]
mod tests;

use std::{
  io::{self, Write},
  path::PathBuf,
};

use anyhow::{Context as _, Result};
use app::App;
use cinesphere_core::{catalog::Catalog, desk::BookingDesk, store::BookingStore};
use cinesphere_store_file::FileStore;
use clap::{Parser, Subcommand};
use prompt::Prompt;
use render::BookingSummary;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "cinesphere", version, about = "CineSphere movie ticket booking console")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "cinesphere.toml")]
  config: PathBuf,

  /// Booking file; overrides `data_file` from the config.
  #[arg(long, env = "CINESPHERE_DATA_FILE", value_name = "FILE")]
  data_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
  /// Start the interactive booking session (default).
  #[default]
  Run,
  /// Print active bookings and exit.
  List {
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },
}

// ─── Config file ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct Settings {
  #[serde(default = "default_data_file")]
  data_file: PathBuf,
}

fn default_data_file() -> PathBuf { PathBuf::from("bookings.txt") }

fn load_settings(cli: &Cli) -> Result<Settings> {
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("CINESPHERE"))
    .build()
    .context("failed to read config file")?;

  let mut settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;
  if let Some(path) = &cli.data_file {
    settings.data_file = path.clone();
  }
  Ok(settings)
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr so they never interleave with the console flow.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = load_settings(&cli)?;
  tracing::debug!(data_file = %settings.data_file.display(), "settings loaded");

  let catalog = Catalog::builtin().context("building theater catalog")?;
  let store = FileStore::new(&settings.data_file);

  match cli.command.unwrap_or_default() {
    Command::Run => {
      let stdin = io::stdin();
      let prompt = Prompt::new(stdin.lock(), io::stdout());
      let mut app = App::new(BookingDesk::new(catalog), store, prompt);
      app.load()?;
      app.run()
    }
    Command::List { json } => list(catalog, &store, json),
  }
}

fn list(catalog: Catalog, store: &FileStore, json: bool) -> Result<()> {
  let mut desk = BookingDesk::new(catalog);
  desk.restore(store.load().context("loading persisted bookings")?);

  let mut out = io::stdout().lock();
  if json {
    let summaries: Vec<_> = desk
      .bookings()
      .iter()
      .map(|b| BookingSummary::new(desk.catalog(), b))
      .collect();
    let text = serde_json::to_string_pretty(&summaries).context("encoding bookings")?;
    writeln!(out, "{text}")?;
    return Ok(());
  }

  if desk.bookings().is_empty() {
    writeln!(out, "No active bookings.")?;
  }
  for booking in desk.bookings() {
    render::booking_brief(&mut out, desk.catalog(), booking)?;
  }
  Ok(())
}
