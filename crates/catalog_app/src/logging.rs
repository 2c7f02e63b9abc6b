//! Logger setup for the catalog binary.
//!
//! Logs go to `./catalog.log` by default so they do not interleave with the
//! terminal UI.

use anyhow::Result;

use crate::config::AppConfig;

pub fn initialize(config: &AppConfig) -> Result<()> {
    let level = config.log_level_filter()?;
    catalog_logging::initialize(config.log_destination.into(), level, &config.log_file);
    Ok(())
}
