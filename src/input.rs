use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Direction keys the games poll as held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Down => 3,
        }
    }
}

/// Held direction keys for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Discrete request carried by a single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
    None,
}

/// Turns the terminal's key event stream into held-key state.
///
/// Terminals that report key releases keep a key held until its release
/// arrives. Others only send presses and auto-repeats, so a key counts as
/// held for `hold` after the last one.
pub struct KeyTracker {
    hold: Duration,
    pressed_at: [Option<Instant>; 4],
    reports_release: bool,
}

impl KeyTracker {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            pressed_at: [None; 4],
            reports_release: false,
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent, now: Instant) -> Command {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Quit;
        }

        if key.kind == KeyEventKind::Release {
            self.reports_release = true;
            if let Some(k) = Key::from_code(key.code) {
                self.pressed_at[k.slot()] = None;
            }
            return Command::None;
        }

        if let Some(k) = Key::from_code(key.code) {
            self.pressed_at[k.slot()] = Some(now);
            return Command::None;
        }

        if key.kind != KeyEventKind::Press {
            return Command::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            _ => Command::None,
        }
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        match self.pressed_at[key.slot()] {
            Some(_) if self.reports_release => true,
            Some(at) => now.saturating_duration_since(at) <= self.hold,
            None => false,
        }
    }

    pub fn controls(&self, now: Instant) -> Controls {
        Controls {
            left: self.is_held(Key::Left, now),
            right: self.is_held(Key::Right, now),
            up: self.is_held(Key::Up, now),
            down: self.is_held(Key::Down, now),
        }
    }

    /// Forget every held key, e.g. after a restart.
    pub fn clear(&mut self) {
        self.pressed_at = [None; 4];
    }
}
