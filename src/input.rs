use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::components::Direction;
use crate::config::INPUT_BUFFER_MS;

/// Remembers the last direction key for a short window, so a press made just
/// before a junction still turns there.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    direction: Direction,
    pressed_at: Option<Instant>,
    window: Duration,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(Duration::from_millis(INPUT_BUFFER_MS))
    }
}

impl InputBuffer {
    pub fn new(window: Duration) -> Self {
        Self {
            direction: Direction::None,
            pressed_at: None,
            window,
        }
    }

    pub fn press(&mut self, direction: Direction, now: Instant) {
        self.direction = direction;
        self.pressed_at = Some(now);
    }

    /// The buffered direction while it is still fresh, `None` otherwise.
    pub fn buffered(&self, now: Instant) -> Direction {
        match self.pressed_at {
            Some(t) if now.saturating_duration_since(t) <= self.window => self.direction,
            _ => Direction::None,
        }
    }

    pub fn clear(&mut self) {
        self.direction = Direction::None;
        self.pressed_at = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
    ToggleDebug,
    Move(Direction),
}

pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

/// Maps a key event to a command. Releases are ignored.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        _ => return None,
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Restart),
        KeyCode::F(3) | KeyCode::Char('d') => Some(Command::ToggleDebug),
        code => direction_for(code).map(Command::Move),
    }
}
