//! Presentation boundary
//!
//! Presenters get a read-only view of a completed tick and never touch
//! simulation state. Painting is left to whoever implements `Presenter`;
//! this crate ships a JSON-lines presenter for headless runs and tooling.

use std::io::{self, Write};

use serde::Serialize;

use crate::sim::{Phase, World};
use crate::ui::{self, Overlay};

/// Everything a presenter may read for one tick
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub phase: Phase,
    pub world: &'a World,
    /// HUD countdown (only refreshed on 100ms steps)
    pub remaining_ms: f32,
}

impl Frame<'_> {
    pub fn overlay(&self) -> Option<Overlay> {
        ui::overlay_for(self.phase)
    }

    pub fn timer_label(&self) -> String {
        ui::timer_label(self.remaining_ms)
    }

    pub fn score_label(&self) -> String {
        ui::score_label(self.world.score)
    }

    pub fn enemy_hues(&self) -> Vec<u32> {
        self.world
            .enemies
            .iter()
            .map(|e| ui::label_hue(&e.label))
            .collect()
    }
}

/// Consumer of frames, called once per driver tick
pub trait Presenter {
    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// One JSON object per line: tick index, frame and overlay
pub struct JsonLinesPresenter<W: Write> {
    out: W,
    tick: u64,
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    tick: u64,
    #[serde(flatten)]
    frame: &'a Frame<'a>,
    overlay: Option<Overlay>,
    /// Hue per enemy, same order as `world.enemies`
    enemy_hues: Vec<u32>,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, tick: 0 }
    }

    /// Frames written so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let line = JsonFrame {
            tick: self.tick,
            frame,
            overlay: frame.overlay(),
            enemy_hues: frame.enemy_hues(),
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.tick += 1;
        Ok(())
    }
}
