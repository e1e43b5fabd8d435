use crate::snake::Direction::{self, *};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;

/// Most key events kept per tick. Anything past this is dropped.
pub const INPUT_CAPACITY: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
}

/// Maps a key press to a command. Keys without a meaning map to `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Steer(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Steer(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Steer(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Steer(Right)),
        KeyCode::Esc | KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Commands read during one tick. The storage is allocated once and reused.
pub struct InputBuffer {
    commands: Vec<Command>,
    dropped: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer { commands: Vec::with_capacity(INPUT_CAPACITY), dropped: 0 }
    }

    pub fn clear(&mut self) {
        if self.dropped > 0 {
            warn!("dropped {} key events past the per-tick limit", self.dropped);
        }
        self.commands.clear();
        self.dropped = 0;
    }

    /// Records a key event. Returns `false` when the buffer is already full.
    pub fn push_key(&mut self, ev: &KeyEvent) -> bool {
        match command_for(ev) {
            Some(cmd) => self.push(cmd),
            None => true,
        }
    }

    pub fn push(&mut self, cmd: Command) -> bool {
        if self.commands.len() >= INPUT_CAPACITY {
            self.dropped += 1;
            return false;
        }
        self.commands.push(cmd);
        true
    }

    /// The last steering command of the burst; earlier ones are superseded.
    pub fn latest_direction(&self) -> Option<Direction> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            Command::Steer(dir) => Some(*dir),
            _ => None,
        })
    }

    pub fn quit_requested(&self) -> bool {
        self.commands.contains(&Command::Quit)
    }

    /// Whether the pause state flips this tick (an odd number of toggles).
    pub fn pause_toggled(&self) -> bool {
        self.commands.iter().filter(|cmd| **cmd == Command::TogglePause).count() % 2 == 1
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Steer(Up)));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::Steer(Left)));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::Steer(Down)));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Some(Command::Steer(Right)));
    }

    #[test]
    fn ctrl_c_quits_and_plain_c_does_nothing() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut buf = InputBuffer::new();
        assert!(buf.push_key(&key(KeyCode::Char('x'))));
        assert!(buf.push_key(&key(KeyCode::Enter)));
        assert!(buf.is_empty());
        assert_eq!(buf.latest_direction(), None);
    }

    #[test]
    fn last_direction_of_a_burst_wins() {
        let mut buf = InputBuffer::new();
        buf.push_key(&key(KeyCode::Up));
        buf.push_key(&key(KeyCode::Left));
        buf.push_key(&key(KeyCode::Esc));
        buf.push_key(&key(KeyCode::Char('z')));

        assert_eq!(buf.latest_direction(), Some(Left));
        assert!(buf.pause_toggled());
        assert!(!buf.quit_requested());
    }

    #[test]
    fn double_pause_cancels_out() {
        let mut buf = InputBuffer::new();
        buf.push(Command::TogglePause);
        buf.push(Command::TogglePause);
        assert!(!buf.pause_toggled());
    }

    #[test]
    fn overflow_is_dropped_and_clear_reuses_storage() {
        let mut buf = InputBuffer::new();
        for _ in 0..INPUT_CAPACITY {
            assert!(buf.push(Command::Steer(Up)));
        }
        assert!(!buf.push(Command::Steer(Down)));
        assert_eq!(buf.len(), INPUT_CAPACITY);
        assert_eq!(buf.latest_direction(), Some(Up));

        let storage = buf.commands.as_ptr();
        buf.clear();
        assert!(buf.is_empty());
        buf.push(Command::Quit);
        assert_eq!(buf.commands.as_ptr(), storage);
        assert!(buf.quit_requested());
    }
}
