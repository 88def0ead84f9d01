mod config;
mod db;
mod export;
mod models;
mod run;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    init_tracing(&config.log_filter);

    let mut store = db::EntryStore::connect(&config.target)
        .with_context(|| format!("Failed to connect to {}", config.target))?;
    store
        .initialize()
        .context("Failed to initialize database schema")?;

    let result = match args.len() {
        1 => run::as_menu(&mut store),
        _ => run::as_cli(&args, &mut store),
    };
    let closed = store.close();
    result?;
    closed.context("Failed to close database connection")
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
