//! Attract mode - the computer plays the game
//!
//! An input source that starts rounds on its own, dodges whatever is about
//! to hit the ship, lines up under a target and keeps the trigger held.

use glam::Vec2;

use crate::consts::*;
use crate::driver::InputSource;
use crate::present::Frame;
use crate::sim::{Phase, TickInput, World};
use crate::squared_distance;

/// Clearance (beyond touching) at which the pilot stops aiming and dodges
const DANGER_CLEARANCE: f32 = 70.0;
/// Horizontal slack before the pilot bothers to re-aim
const AIM_SLACK: f32 = 6.0;
/// The pilot drifts back toward this height between dodges
const HOME_Y: f32 = ARENA_HEIGHT - PLAYER_SPAWN_LIFT;

/// Demo pilot; plays a fixed number of rounds then closes
#[derive(Debug, Clone)]
pub struct Autopilot {
    rounds: u32,
    finished: u32,
    last_phase: Phase,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Autopilot {
    /// Play `rounds` rounds (at least one)
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
            finished: 0,
            last_phase: Phase::Menu,
        }
    }

    /// Rounds seen to completion
    pub fn finished(&self) -> u32 {
        self.finished
    }

    /// Movement and fire for one playing tick
    pub fn steer(world: &World) -> TickInput {
        let player = &world.player;
        let mut input = TickInput {
            fire: true,
            ..Default::default()
        };

        // Closest enemy by edge-to-edge gap
        let threat = world.enemies.iter().min_by(|a, b| {
            let gap_a = squared_distance(a.pos, player.pos).sqrt() - a.radius;
            let gap_b = squared_distance(b.pos, player.pos).sqrt() - b.radius;
            gap_a
                .partial_cmp(&gap_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(threat) = threat {
            let away = player.pos - threat.pos;
            let gap = away.length() - threat.radius - player.radius;
            if gap < DANGER_CLEARANCE {
                // Predict a little so we dodge where it's going, not where it was
                let away = away - threat.vel * 4.0;
                press_toward(&mut input, away);
                return input;
            }
        }

        // Aim at the enemy most nearly overhead
        let target = world
            .enemies
            .iter()
            .filter(|e| e.pos.y < player.pos.y)
            .min_by(|a, b| {
                let da = (a.pos.x - player.pos.x).abs();
                let db = (b.pos.x - player.pos.x).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut want = Vec2::ZERO;
        if let Some(target) = target {
            let dx = target.pos.x - player.pos.x;
            if dx.abs() > AIM_SLACK {
                want.x = dx;
            }
        }
        let dy = HOME_Y - player.pos.y;
        if dy.abs() > PLAYER_SPEED {
            want.y = dy;
        }
        press_toward(&mut input, want);
        input
    }
}

/// Hold the axis keys pointing along `dir`
fn press_toward(input: &mut TickInput, dir: Vec2) {
    input.left = dir.x < 0.0;
    input.right = dir.x > 0.0;
    input.up = dir.y < 0.0;
    input.down = dir.y > 0.0;
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: &Frame<'_>) -> Option<TickInput> {
        if frame.phase != self.last_phase {
            if frame.phase.is_finished() {
                self.finished += 1;
                log::info!(
                    "Autopilot round {} {:?} with score {}",
                    self.finished,
                    frame.phase,
                    frame.world.score
                );
            }
            self.last_phase = frame.phase;
        }

        match frame.phase {
            Phase::Menu => Some(TickInput {
                confirm: true,
                ..Default::default()
            }),
            Phase::Playing => Some(Self::steer(frame.world)),
            Phase::Won | Phase::Lost if self.finished < self.rounds => Some(TickInput {
                confirm: true,
                ..Default::default()
            }),
            Phase::Won | Phase::Lost => None,
        }
    }
}
