use std::thread::sleep;

use wrapsnake::config::Config;
use wrapsnake::game::{Game, Status};
use wrapsnake::input::{InputBuffer, is_ctrl_c};
use wrapsnake::term::TermManager;

use anyhow::{Context, Result, bail};
use log::info;

/// Rows below the bordered board: the score line.
const STATUS_ROWS: u16 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Lost,
    Won,
    Quit,
}

pub struct Summary {
    pub ending: Ending,
    pub score: u32,
}

pub struct SnakeApp {
    config: Config,
    paused: bool,
    term: TermManager,
    input: InputBuffer,
}

impl SnakeApp {
    pub fn new(config: Config) -> Self {
        SnakeApp { config, paused: false, term: TermManager::new(), input: InputBuffer::new() }
    }

    /// Plays one game from the intro screen to the final message and hands
    /// the terminal back before returning.
    pub fn run(mut self) -> Result<Summary> {
        self.check_terminal_size()?;
        self.term.setup().context("could not prepare the terminal")?;

        let res = self.start().and_then(|game| match game {
            Some(game) => self.play(game),
            None => Ok(Summary { ending: Ending::Quit, score: 0 }),
        });

        // Restore even when the game failed, but report the game error first
        let restored = self.term.restore().context("could not restore the terminal");
        let summary = res?;
        restored?;
        Ok(summary)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn check_terminal_size(&self) -> Result<()> {
        let board = self.config.board;
        let (cols, rows) = self.term.terminal_size().context("could not read the terminal size")?;
        let (need_cols, need_rows) = (board.width as u32 + 2, board.height as u32 + 2 + STATUS_ROWS as u32);

        if (cols as u32) < need_cols || (rows as u32) < need_rows {
            bail!(
                "terminal is {}x{} but a {}x{} board needs at least {}x{}",
                cols, rows, board.width, board.height, need_cols, need_rows
            );
        }
        Ok(())
    }

    /// Sets up the board and shows the intro over it. `None` means the
    /// player quit before the first tick.
    fn start(&mut self) -> Result<Option<Game>> {
        let game = Game::new(self.config.board, self.config.seed)?;
        self.draw(&game)?;

        if self.show_intro()? {
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    /// Returns `false` if the player chose to quit right away.
    fn show_intro(&mut self) -> Result<bool> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc or P to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;
        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;

        Ok(!is_ctrl_c(&key))
    }

    fn play(&mut self, mut game: Game) -> Result<Summary> {
        let ending = loop {
            sleep(self.config.tick);

            self.term.read_key_events(&mut self.input)?;
            if self.input.quit_requested() {
                info!("player quit with score {}", game.score());
                break Ending::Quit;
            }
            if self.input.pause_toggled() {
                self.toggle_pause()?;
            }

            if self.paused { continue; }

            let status = game.tick(self.input.latest_direction())?;
            self.draw(&game)?;

            match status {
                Status::Running => {},
                Status::Lost => break Ending::Lost,
                Status::Won => break Ending::Won,
            }
        };

        let score = game.finish();
        if ending != Ending::Quit {
            self.game_over(ending, score)?;
        }

        Ok(Summary { ending, score })
    }

    fn draw(&mut self, game: &Game) -> Result<()> {
        let status = format!("Score: {}", game.score());
        self.term.draw_frame(&game.frame(), &status)?;
        Ok(())
    }

    fn game_over(&mut self, ending: Ending, score: u32) -> Result<()> {
        let s = if ending == Ending::Won {"You won!"} else {"Game over!"};

        self.term.show_message(&[
            s,
            &*format!("Score: {}", score),
            "",
            "Press any key to exit",
        ])?;
        self.term.read_key_blocking()?;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}
