use crate::TermInt;
use crate::grid::BoardSize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use thiserror::Error;

pub const DEFAULT_WIDTH: TermInt = 84;
pub const DEFAULT_HEIGHT: TermInt = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    pub fn tick(self) -> Duration {
        match self {
            Speed::Slow => Duration::from_millis(500),
            Speed::Medium => Duration::from_millis(250),
            Speed::Fast => Duration::from_millis(100),
        }
    }
}

/// Snake on a board whose edges wrap around.
#[derive(Parser, Debug)]
#[command(name = "wrapsnake", version)]
pub struct Args {
    /// board width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: TermInt,

    /// board height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: TermInt,

    /// tick rate preset
    #[arg(long, value_enum, default_value_t = Speed::Medium)]
    pub speed: Speed,

    /// milliseconds per tick, overrides --speed
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// seed for food placement and the starting layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// write a log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// log debug messages too
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub board: BoardSize,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 2x2, got {width}x{height}")]
    BoardTooSmall { width: TermInt, height: TermInt },
    #[error("tick interval must be greater than zero")]
    ZeroTick,
}

impl Args {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::BoardTooSmall { width: self.width, height: self.height });
        }

        let tick = match self.tick_ms {
            Some(0) => return Err(ConfigError::ZeroTick),
            Some(ms) => Duration::from_millis(ms),
            None => self.speed.tick(),
        };

        Ok(Config {
            board: BoardSize::new(self.width, self.height),
            tick,
            seed: self.seed,
            log_file: self.log_file,
            log_level: if self.verbose { LevelFilter::Debug } else { LevelFilter::Info },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board: BoardSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            tick: Speed::Medium.tick(),
            seed: None,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}
