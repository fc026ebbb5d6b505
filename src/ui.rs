//! Screen layout shared by presenters and pointer hit testing
//!
//! Buttons live in arena coordinates, so the same rectangle is drawn by the
//! presenter and tested against clicks by the state machine.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::Phase;

/// Axis-aligned rectangle in arena units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// A clickable call to action
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

pub const START_BUTTON: Button = Button {
    rect: Rect::new(ARENA_WIDTH / 2.0 - 90.0, ARENA_HEIGHT / 2.0 + 6.0, 180.0, 46.0),
    label: "Start",
};

pub const RETRY_BUTTON: Button = Button {
    rect: Rect::new(ARENA_WIDTH / 2.0 - 70.0, ARENA_HEIGHT / 2.0 + 22.0, 140.0, 44.0),
    label: "Retry",
};

/// Button shown over the given phase, if any
pub fn button_for(phase: Phase) -> Option<Button> {
    match phase {
        Phase::Menu => Some(START_BUTTON),
        Phase::Won | Phase::Lost => Some(RETRY_BUTTON),
        Phase::Playing => None,
    }
}

/// Text and button drawn on top of the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button: Button,
}

/// Overlay for the given phase; nothing covers the arena while playing
pub fn overlay_for(phase: Phase) -> Option<Overlay> {
    let (title, subtitle) = match phase {
        Phase::Menu => ("ITSM Space Shooter", "Single Level · One Life · 30s"),
        Phase::Won => ("Queue cleared!", "Every ticket closed before the deadline."),
        Phase::Lost => ("The tickets got through.", "One life, thirty seconds. Try again?"),
        Phase::Playing => return None,
    };
    Some(Overlay {
        title,
        subtitle,
        button: button_for(phase)?,
    })
}

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

/// Whole seconds left, rounded up and zero padded
pub fn timer_label(remaining_ms: f32) -> String {
    let secs = (remaining_ms.max(0.0) / 1000.0).ceil() as u32;
    format!("⏱ {secs:02}s")
}

/// Stable hue (degrees) for an enemy label
pub fn label_hue(label: &str) -> u32 {
    (label.len() as u32 * 41) % 360
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_inclusive() {
        let r = START_BUTTON.rect;
        assert!(r.contains(Vec2::new(422.0, 326.0)));
        assert!(r.contains(Vec2::new(602.0, 372.0)));
        assert!(!r.contains(Vec2::new(421.9, 330.0)));
        assert!(!r.contains(Vec2::new(500.0, 372.1)));

        let r = RETRY_BUTTON.rect;
        assert!(r.contains(Vec2::new(442.0, 342.0)));
        assert!(r.contains(Vec2::new(582.0, 386.0)));
        assert!(!r.contains(Vec2::new(583.0, 350.0)));
    }

    #[test]
    fn test_button_per_phase() {
        assert_eq!(button_for(Phase::Menu), Some(START_BUTTON));
        assert_eq!(button_for(Phase::Playing), None);
        assert_eq!(button_for(Phase::Won), Some(RETRY_BUTTON));
        assert_eq!(button_for(Phase::Lost), Some(RETRY_BUTTON));
    }

    #[test]
    fn test_overlay() {
        assert!(overlay_for(Phase::Playing).is_none());
        let menu = overlay_for(Phase::Menu).map(|o| o.button.label);
        assert_eq!(menu, Some("Start"));
        let lost = overlay_for(Phase::Lost).map(|o| o.button.label);
        assert_eq!(lost, Some("Retry"));
    }

    #[test]
    fn test_timer_label_rounds_up() {
        assert_eq!(timer_label(30_000.0), "⏱ 30s");
        assert_eq!(timer_label(9_001.0), "⏱ 10s");
        assert_eq!(timer_label(72.0), "⏱ 01s");
        assert_eq!(timer_label(0.0), "⏱ 00s");
    }

    #[test]
    fn test_labels() {
        assert_eq!(score_label(130), "Score: 130");
        // 9 characters * 41 wraps past 360
        assert_eq!(label_hue("P1 Outage"), 9);
        assert_eq!(label_hue("Barcode Scan Fail"), (17 * 41) % 360);
    }
}
