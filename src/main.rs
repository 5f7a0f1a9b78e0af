mod args;
mod config;
mod corpus;
mod ui;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use config::JsonFileStore;
use corpus::{CorpusLoader, PoetryDb};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};
use ui::{app::BANNER, App};

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    writeln!(stdout, "{BANNER}")?;

    let store = JsonFileStore::new(args.config_path());
    let config = config::load_or_default(&store, &mut stdout)?;

    let start = Instant::now();
    let source = PoetryDb::new(&args.url, Duration::from_secs(args.timeout));
    let (sonnets, origin) = CorpusLoader::new(source, args.cache_path())
        .load()
        .context("failed to load sonnets")?;
    let elapsed = start.elapsed();

    writeln!(stdout, "{}", origin.message())?;
    writeln!(
        stdout,
        "Loading sonnets took: {:.3} [ms]",
        elapsed.as_secs_f64() * 1000.0
    )?;
    writeln!(stdout, "Loaded {} sonnets.", sonnets.len())?;

    App::new(sonnets, config, store, stdout).run(io::stdin().lock())
}
