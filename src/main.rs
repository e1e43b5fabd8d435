mod app;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::WriteLogger;
use wrapsnake::config::{Args, Config};

use app::{Ending, SnakeApp};

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;
    init_logging(&config)?;

    info!("starting on a {}x{} board, tick {:?}", config.board.width, config.board.height, config.tick);

    // The app restores the terminal itself, including on error
    let summary = SnakeApp::new(config).run()?;

    let s = match summary.ending {
        Ending::Lost => "You lose!",
        Ending::Won => "You won!",
        Ending::Quit => "Quit.",
    };
    println!("{}", s);
    println!("Score: {}", summary.score);

    Ok(())
}

/// stdout belongs to the board, so logs only ever go to a file.
fn init_logging(config: &Config) -> Result<()> {
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        WriteLogger::init(config.log_level, simplelog::Config::default(), file)
            .context("could not install the logger")?;
    }
    Ok(())
}
