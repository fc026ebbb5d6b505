//! Keyboard and pointer mapping
//!
//! Raw platform events go in, a `TickInput` snapshot comes out once per tick.
//! Held keys are level-triggered (last event wins); confirm and clicks are
//! one-shot and cleared by `snapshot`.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::TickInput;

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
    Enter,
}

impl Key {
    const ALL: [Key; 10] = [
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::A,
        Key::D,
        Key::W,
        Key::S,
        Key::Space,
        Key::Enter,
    ];

    /// Parse a DOM-style key name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        if name == " " {
            return Some(Key::Space);
        }
        match name.to_lowercase().as_str() {
            "arrowleft" => Some(Key::ArrowLeft),
            "arrowright" => Some(Key::ArrowRight),
            "arrowup" => Some(Key::ArrowUp),
            "arrowdown" => Some(Key::ArrowDown),
            "a" => Some(Key::A),
            "d" => Some(Key::D),
            "w" => Some(Key::W),
            "s" => Some(Key::S),
            "space" | "spacebar" => Some(Key::Space),
            "enter" => Some(Key::Enter),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Accumulates events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; Key::ALL.len()],
    confirm: bool,
    click: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Key pressed. Auto-repeat of an already held key does not re-confirm.
    pub fn key_down(&mut self, key: Key) {
        if key == Key::Enter && !self.is_held(key) {
            self.confirm = true;
        }
        self.held[key.index()] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Name-based variants for platforms that report DOM key names
    pub fn key_down_named(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.key_down(key);
        }
    }

    pub fn key_up_named(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.key_up(key);
        }
    }

    /// Click already mapped into arena coordinates
    pub fn click(&mut self, arena_pos: Vec2) {
        self.click = Some(arena_pos);
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Logical input for this tick; clears the one-shot signals
    pub fn snapshot(&mut self) -> TickInput {
        let held = |keys: &[Key]| keys.iter().any(|&k| self.is_held(k));
        let input = TickInput {
            left: held(&[Key::A, Key::ArrowLeft]),
            right: held(&[Key::D, Key::ArrowRight]),
            up: held(&[Key::W, Key::ArrowUp]),
            down: held(&[Key::S, Key::ArrowDown]),
            fire: held(&[Key::Space, Key::Enter]),
            confirm: self.confirm,
            click: self.click,
        };
        self.confirm = false;
        self.click = None;
        input
    }
}

/// Map a client-space point on a (possibly scaled) viewport into arena units.
///
/// `viewport` is the drawn area's origin and size in client pixels.
pub fn client_to_arena(client: Vec2, viewport_origin: Vec2, viewport_size: Vec2) -> Vec2 {
    let scale = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) / viewport_size;
    (client - viewport_origin) * scale
}
