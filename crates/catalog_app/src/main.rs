mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let mut config = config::AppConfig::load(args.config.as_deref())?;
    config.apply_args(&args);
    logging::initialize(&config)?;

    app::run_app(args, config)
}
