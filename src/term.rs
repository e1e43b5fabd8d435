use crate::TermInt;
use crate::input::InputBuffer;
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use log::debug;

/// Owns the terminal while the game runs: raw mode, the alternate screen and
/// the hidden cursor. Restoring is idempotent and also happens on drop.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    raw_mode: bool,
    active: bool,
    screen: Vec<String>,
    current_msg: Option<Vec<String>>,
}

impl TermManager<Stdout> {
    pub fn new() -> Self {
        TermManager::with_writer(stdout(), true)
    }
}

impl Default for TermManager<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TermManager<W> {
    /// A manager that only writes escape sequences to `out` and never touches
    /// the tty's raw mode.
    pub fn headless(out: W) -> Self {
        TermManager::with_writer(out, false)
    }

    fn with_writer(out: W, raw_mode: bool) -> Self {
        TermManager { out, raw_mode, active: false, screen: vec![], current_msg: None }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        execute!(self.out, EnterAlternateScreen, terminal::Clear(ClearType::All))?;
        self.active = true;
        if self.raw_mode {
            terminal::enable_raw_mode()?;
        }
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)?;
        debug!("terminal set up");
        Ok(())
    }

    /// Gives the terminal back: raw mode off, cursor visible, main screen.
    /// Calling it again after it succeeded does nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = if self.raw_mode { terminal::disable_raw_mode() } else { Ok(()) };
        execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        debug!("terminal restored");
        raw
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn terminal_size(&self) -> io::Result<(TermInt, TermInt)> {
        terminal::size()
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    /// Drains every pending key event without waiting. The buffer is cleared
    /// first, so it only ever holds this tick's input.
    pub fn read_key_events(&self, buf: &mut InputBuffer) -> io::Result<()> {
        buf.clear();

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                buf.push_key(&ev);
            }
        }

        Ok(())
    }

    /// Puts a serialized board on screen with a status line underneath.
    pub fn draw_frame(&mut self, frame: &str, status: &str) -> io::Result<()> {
        self.screen.clear();
        self.screen.extend(frame.lines().map(str::to_owned));
        self.screen.push(status.to_owned());

        self.redraw()?;

        // Keep an open message on top of the new frame
        match self.current_msg.take() {
            Some(lines) => {
                let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
                self.show_message(&lines)
            },
            None => Ok(()),
        }
    }

    /// Shows a centred box over the last frame.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let (area_w, area_h) = self.area();
        let center = (area_w / 2, area_h / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.out, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.out, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.current_msg = Some(lines.iter().map(|line| line.to_string()).collect());
        self.out.flush()
    }

    /// Removes the message box by repainting the frame underneath it.
    pub fn hide_message(&mut self) -> io::Result<()> {
        if self.current_msg.take().is_none() {
            return Ok(());
        }
        self.redraw()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn redraw(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for (y, line) in self.screen.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as TermInt), style::Print(line))?;
        }
        self.out.flush()
    }

    fn area(&self) -> (TermInt, TermInt) {
        let width = self.screen.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        (width as TermInt, self.screen.len() as TermInt)
    }
}

impl<W: Write> Drop for TermManager<W> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
