use std::fs::File;

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

/// Sends every log record to `path`. The terminal belongs to the game, so
/// nothing is logged there.
pub fn init_logger(path: &str, level: LevelFilter) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path))?;
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Off).build();

    WriteLogger::init(level, config, file).context("Failed to initialize logger")
}
