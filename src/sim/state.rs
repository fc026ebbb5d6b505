//! Game state and core simulation types
//!
//! Plain data: the world a tick reads and writes, plus spawn helpers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::uniform_random;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Every enemy destroyed in time
    Won,
    /// Timer ran out or the player was hit
    Lost,
}

impl Phase {
    /// Won and Lost only leave through a retry
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Rotating enemy labels
pub const ENEMY_LABELS: [&str; 15] = [
    "P1 Outage",
    "SLA Breach",
    "VIP Escalation",
    "CMDB Drift",
    "Change Failure",
    "Patch Backlog",
    "Shadow IT",
    "Printer Chaos",
    "Password Flood",
    "Email Storm",
    "License Expiry",
    "Asset Mismatch",
    "Barcode Scan Fail",
    "Siloed Teams",
    "Ticket Spam",
];

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// One life; a hit ends the round instead of decrementing this
    pub hp: u8,
}

impl Player {
    /// Bottom-center spawn
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - PLAYER_SPAWN_LIFT),
            radius: PLAYER_RADIUS,
            hp: 1,
        }
    }

    /// Where the next bullet appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.radius - BULLET_NOSE_GAP)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn()
    }
}

/// A player bullet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    /// Bullet travelling straight up from `pos`
    pub fn fired_from(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -BULLET_SPEED),
            radius: BULLET_RADIUS,
        }
    }

    /// Still inside the arena (plus cull margin); nothing culls at the bottom
    pub fn in_bounds(&self) -> bool {
        self.pos.y > -BULLET_CULL_MARGIN
            && self.pos.x > -BULLET_CULL_MARGIN
            && self.pos.x < ARENA_WIDTH + BULLET_CULL_MARGIN
    }
}

/// A labeled drifting target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub label: String,
    /// Milliseconds accumulated toward the next dash (negative = recovering)
    pub dash_ms: f32,
}

/// Everything a tick reads and writes, minus the phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub score: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
}

impl World {
    /// Fresh level: new player, no bullets, a full enemy batch, zero score
    pub fn spawn_level<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            score: 0,
            player: Player::spawn(),
            bullets: Vec::new(),
            enemies: spawn_enemies(rng),
        }
    }
}

/// Spawn the fixed enemy batch in the upper part of the arena
pub fn spawn_enemies<R: Rng + ?Sized>(rng: &mut R) -> Vec<Enemy> {
    (0..ENEMY_COUNT).map(|i| spawn_enemy(rng, i)).collect()
}

fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, index: usize) -> Enemy {
    let radius = ENEMY_RADIUS_BASE + (index % 3) as f32 * ENEMY_RADIUS_STEP;
    let x = uniform_random(rng, SPAWN_PAD, ARENA_WIDTH - SPAWN_PAD);
    let y = uniform_random(rng, SPAWN_PAD, ARENA_HEIGHT * SPAWN_TOP_FRACTION);
    let speed = ENEMY_BASE_SPEED + uniform_random(rng, 0.0, ENEMY_SPEED_SPREAD);
    let heading = uniform_random(rng, 0.0, std::f32::consts::TAU);
    let hp = (ENEMY_BASE_HP + uniform_random(rng, 0.0, ENEMY_HP_SPREAD)).round() as i32;

    Enemy {
        pos: Vec2::new(x, y),
        vel: Vec2::new(heading.cos(), heading.sin()) * speed,
        radius,
        hp,
        label: ENEMY_LABELS[index % ENEMY_LABELS.len()].to_string(),
        dash_ms: uniform_random(rng, 0.0, DASH_STAGGER_MS),
    }
}
