//! Enemy steering
//!
//! Per enemy, every tick: home toward the player, dash periodically, cap the
//! speed, integrate and bounce off the arena edges. After that a pairwise
//! separation pass keeps the swarm from clumping.

use glam::Vec2;
use rand::Rng;

use super::state::Enemy;
use crate::consts::*;
use crate::uniform_random;

/// Steering parameters for the current stretch of the round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggression {
    pub steer_gain: f32,
    pub dash_speed: f32,
    pub speed_cap: f32,
}

impl Aggression {
    pub const NORMAL: Self = Self {
        steer_gain: STEER_GAIN,
        dash_speed: DASH_SPEED,
        speed_cap: SPEED_CAP,
    };

    pub const PANIC: Self = Self {
        steer_gain: STEER_GAIN_PANIC,
        dash_speed: DASH_SPEED_PANIC,
        speed_cap: SPEED_CAP_PANIC,
    };

    /// Panic kicks in for the last stretch of the countdown
    pub fn for_remaining(remaining_ms: f32) -> Self {
        if remaining_ms < PANIC_WINDOW_MS {
            Self::PANIC
        } else {
            Self::NORMAL
        }
    }
}

/// Homing, dash, speed cap, then integrate and bounce
pub fn steer_enemy<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    target: Vec2,
    elapsed_ms: f32,
    aggression: Aggression,
    rng: &mut R,
) {
    let to_target = target - enemy.pos;
    // Clamp the divisor so an enemy sitting on the player doesn't explode
    let dist = to_target.length().max(1.0);
    let toward = to_target / dist;

    enemy.vel += toward * aggression.steer_gain;

    enemy.dash_ms += elapsed_ms;
    if enemy.dash_ms > DASH_THRESHOLD_MS {
        // Dash overwrites velocity rather than adding to it
        enemy.vel = toward * aggression.dash_speed;
        enemy.dash_ms = DASH_RECOVERY_MIN_MS + uniform_random(rng, 0.0, DASH_RECOVERY_SPREAD_MS);
    }

    // Never scales up: slow enemies keep their speed
    let speed = enemy.vel.length().max(ENEMY_BASE_SPEED);
    enemy.vel *= (aggression.speed_cap / speed).min(1.0);

    enemy.pos += enemy.vel;
    bounce(enemy);
}

/// Reflect velocity at the arena edges. Position is left where it is, so an
/// enemy can overshoot an edge by one tick of travel.
fn bounce(enemy: &mut Enemy) {
    let r = enemy.radius;
    if enemy.pos.x < r || enemy.pos.x > ARENA_WIDTH - r {
        enemy.vel.x = -enemy.vel.x;
    }
    if enemy.pos.y < r || enemy.pos.y > ARENA_HEIGHT - r {
        enemy.vel.y = -enemy.vel.y;
    }
}

/// Nudge every too-close pair apart. Runs once per unordered pair.
pub fn separate(enemies: &mut [Enemy]) {
    for i in 0..enemies.len() {
        let (head, tail) = enemies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let d = a.pos - b.pos;
            let min = a.radius + b.radius + SEPARATION_MARGIN;
            let d2 = d.length_squared();
            if d2 < min * min {
                let push = d / d2.sqrt().max(1.0) * SEPARATION_PUSH;
                a.vel += push;
                b.vel -= push;
            }
        }
    }
}
