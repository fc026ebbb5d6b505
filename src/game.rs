//! Phase state machine
//!
//! Owns the authoritative world and decides whether the simulation runs.
//! Menu -> Playing on start, Playing -> Won/Lost on the tick outcome,
//! Won/Lost -> Playing on retry. Nothing else moves the phase.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::HUD_TIMER_STEP_MS;
use crate::present::Frame;
use crate::sim::{Phase, RoundClock, TickInput, World, advance};
use crate::ui;

/// A single-player session
#[derive(Debug, Clone)]
pub struct Game {
    seed: u64,
    rng: Pcg32,
    phase: Phase,
    world: World,
    clock: RoundClock,
    /// Remaining time as last published to the HUD
    hud_remaining_ms: f32,
    /// Levels spawned so far (start + retries)
    rounds: u32,
}

impl Game {
    /// New session on the title screen
    pub fn new(seed: u64) -> Self {
        let clock = RoundClock::new();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Menu,
            world: World::default(),
            clock,
            hud_remaining_ms: clock.remaining_ms,
            rounds: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Remaining time, refreshed only when it crosses a 100ms step
    pub fn hud_remaining_ms(&self) -> f32 {
        self.hud_remaining_ms
    }

    /// Read-only view of the last completed tick
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            world: &self.world,
            remaining_ms: self.hud_remaining_ms,
        }
    }

    /// Start from the menu or retry after a finished round.
    ///
    /// Returns false (and does nothing) while a round is in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Playing {
            return false;
        }
        self.spawn_level();
        true
    }

    /// Run one driver tick
    pub fn update(&mut self, input: &TickInput, elapsed_ms: f32) {
        if self.phase != Phase::Playing {
            if self.wants_start(input) {
                self.start();
            }
            return;
        }

        let before = self.clock.remaining_ms;
        let phase = advance(
            &mut self.world,
            &mut self.clock,
            input,
            elapsed_ms,
            &mut self.rng,
        );
        self.publish_timer(before);

        if phase != self.phase {
            log::info!(
                "Round {} {:?}: score {}, {} enemies left, {:.1}s remaining",
                self.rounds,
                phase,
                self.world.score,
                self.world.enemies.len(),
                self.clock.remaining_ms / 1000.0
            );
            self.phase = phase;
        }
    }

    /// Confirm key, or a click on the button shown for this phase
    fn wants_start(&self, input: &TickInput) -> bool {
        if input.confirm {
            return true;
        }
        match (input.click, ui::button_for(self.phase)) {
            (Some(click), Some(button)) => button.rect.contains(click),
            _ => false,
        }
    }

    fn spawn_level(&mut self) {
        self.world = World::spawn_level(&mut self.rng);
        self.clock = RoundClock::new();
        self.hud_remaining_ms = self.clock.remaining_ms;
        self.rounds += 1;
        self.phase = Phase::Playing;
        log::info!(
            "Round {} started (seed {}, {} enemies)",
            self.rounds,
            self.seed,
            self.world.enemies.len()
        );
    }

    fn publish_timer(&mut self, before: f32) {
        let now = self.clock.remaining_ms;
        if (before / HUD_TIMER_STEP_MS).floor() != (now / HUD_TIMER_STEP_MS).floor() {
            self.hud_remaining_ms = now;
        }
    }
}
