use std::path::PathBuf;

use clap::Parser;

use crate::config::LogTarget;

/// Browse the Rick and Morty character catalog from the terminal.
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
pub struct Args {
    /// RON config file. Defaults to ./catalog.ron when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing API base URL, e.g. https://rickandmortyapi.com/api/
    #[arg(long)]
    pub base_url: Option<String>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,

    /// Initial name search.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Initial status filter (Alive, Dead, Unknown).
    #[arg(long)]
    pub status: Option<String>,

    /// Initial gender filter (Male, Female, Genderless, Unknown).
    #[arg(long)]
    pub gender: Option<String>,
}
