mod audio;
mod clock;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod logger;
mod render;
mod session;
mod snake;
mod state;
mod term;

use anyhow::{anyhow, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::TerminalBell;
use crate::clock::MonotonicClock;
use crate::config::{ConfigManager, GameConfig};
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

const CONFIG_FILE: &str = "snake.yaml";

fn main() -> Result<()> {
    let loaded = ConfigManager::from_yaml_file(CONFIG_FILE)
        .get_config::<GameConfig>()
        .map_err(|e| anyhow!(e))?;
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    logger::init_logger(&config.log_file, config.level_filter().map_err(|e| anyhow!(e))?)?;
    info!("Starting snake");
    if from_file {
        info!("Config loaded from {}", CONFIG_FILE);
    } else {
        info!("No {} found, using defaults", CONFIG_FILE);
    }

    let grid = config.grid();
    let mut term = TermManager::new(&grid)?;
    term.setup()?;

    let result = game::SnakeGame::new(
        &mut term,
        TerminalBell::new(config.sound),
        MonotonicClock::new(),
        grid,
        StdRng::from_entropy(),
    )
    .run();

    // The terminal goes back to normal whether or not the game failed
    term.restore()?;
    info!("Bye");
    result
}
