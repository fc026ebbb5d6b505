//! ITSM Space Shooter - single level, one life, thirty seconds
//!
//! Core modules:
//! - `sim`: Simulation (entities, enemy AI, collisions, tick)
//! - `game`: Phase state machine that gates the simulation
//! - `driver`: Frame clock and the simulate/present loop
//! - `input`: Key and pointer mapping into logical tick input
//! - `present`: Read-only frame view handed to presenters
//! - `ui`: Button layout, overlay copy and HUD labels
//! - `autopilot`: Attract-mode input source

pub mod autopilot;
pub mod driver;
pub mod game;
pub mod input;
pub mod present;
pub mod sim;
pub mod ui;

pub use game::Game;
pub use sim::{Phase, TickInput, World};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical units, independent of device pixels)
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 640.0;

    /// Round length
    pub const ROUND_MS: f32 = 30_000.0;
    /// Enemies get faster and hungrier below this much remaining time
    pub const PANIC_WINDOW_MS: f32 = 10_000.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Distance of the spawn point from the bottom edge
    pub const PLAYER_SPAWN_LIFT: f32 = 100.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 11.0;
    /// Gap between the ship's nose and a freshly fired bullet
    pub const BULLET_NOSE_GAP: f32 = 4.0;
    /// Bullets are culled this far past the top/left/right edges
    pub const BULLET_CULL_MARGIN: f32 = 12.0;
    pub const FIRE_INTERVAL_MS: f32 = 150.0;

    /// Enemy spawn
    pub const ENEMY_COUNT: usize = 28;
    pub const ENEMY_RADIUS_BASE: f32 = 18.0;
    pub const ENEMY_RADIUS_STEP: f32 = 3.0;
    pub const ENEMY_BASE_SPEED: f32 = 1.8;
    pub const ENEMY_SPEED_SPREAD: f32 = 1.0;
    pub const ENEMY_BASE_HP: f32 = 2.0;
    pub const ENEMY_HP_SPREAD: f32 = 1.4;
    /// Inset of the spawn rectangle from the arena edges
    pub const SPAWN_PAD: f32 = 60.0;
    /// Enemies spawn above this fraction of the arena height
    pub const SPAWN_TOP_FRACTION: f32 = 0.35;
    /// Initial dash counters are staggered across [0, this)
    pub const DASH_STAGGER_MS: f32 = 800.0;

    /// Enemy steering (normal / panic)
    pub const STEER_GAIN: f32 = 0.09;
    pub const STEER_GAIN_PANIC: f32 = 0.12;
    pub const DASH_THRESHOLD_MS: f32 = 1100.0;
    pub const DASH_SPEED: f32 = 4.3;
    pub const DASH_SPEED_PANIC: f32 = 5.2;
    /// After a dash the counter restarts somewhere in [MIN, MIN + SPREAD)
    pub const DASH_RECOVERY_MIN_MS: f32 = -280.0;
    pub const DASH_RECOVERY_SPREAD_MS: f32 = 120.0;
    pub const SPEED_CAP: f32 = 4.0;
    pub const SPEED_CAP_PANIC: f32 = 5.0;

    /// Separation between enemies
    pub const SEPARATION_MARGIN: f32 = 6.0;
    pub const SEPARATION_PUSH: f32 = 0.06;

    /// Score awarded per destroyed enemy
    pub const SCORE_PER_ENEMY: u32 = 10;

    /// Driver cadence
    pub const MAX_FRAME_MS: f32 = 33.0;
    pub const TARGET_FRAME_MS: f32 = 1000.0 / 60.0;
    /// HUD timer is republished only when this step boundary changes
    pub const HUD_TIMER_STEP_MS: f32 = 100.0;
}

/// Clamp `v` into [lo, hi]
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Uniform sample in [lo, hi)
#[inline]
pub fn uniform_random<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    rng.random::<f32>() * (hi - lo) + lo
}

/// Squared distance between two points
#[inline]
pub fn squared_distance(a: Vec2, b: Vec2) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_uniform_random_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = uniform_random(&mut rng, -280.0, -160.0);
            assert!((-280.0..-160.0).contains(&v));
        }
        // Degenerate range collapses to the bound instead of panicking
        assert_eq!(uniform_random(&mut rng, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_squared_distance() {
        let d2 = squared_distance(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
        assert!((d2 - 25.0).abs() < 1e-6);
        assert_eq!(squared_distance(Vec2::ZERO, Vec2::ZERO), 0.0);
    }
}
