mod config;
mod db;
mod error;
mod export;
mod ledger;
mod models;
mod notify;
mod run;
mod util;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    let db = db::Database::open(&config.db_path, config.busy_timeout)?;
    let mut ledger = ledger::Ledger::new(db, notify::ConsoleNotifier);

    run::as_cli(&args, &config, &mut ledger)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
