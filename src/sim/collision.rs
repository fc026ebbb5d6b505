//! Collision detection and response for circles
//!
//! Everything in the arena is a circle, so a single overlap test covers
//! bullet/enemy and player/enemy contacts.

use glam::Vec2;

use super::state::World;
use crate::consts::SCORE_PER_ENEMY;
use crate::squared_distance;

/// Circles touch or overlap (boundary contact counts)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let rad = ra + rb;
    squared_distance(a, b) <= rad * rad
}

/// Outcome of resolving bullet hits for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Bullets consumed by impacts
    pub hits: u32,
    /// Enemies removed because their hp reached zero
    pub destroyed: u32,
}

/// Resolve bullet/enemy impacts.
///
/// Enemies and bullets are walked back to front so removal keeps indices
/// valid. Each enemy takes at most one hit per tick and every impact
/// consumes its bullet.
pub fn resolve_bullet_hits(world: &mut World) -> HitReport {
    let mut report = HitReport::default();

    for i in (0..world.enemies.len()).rev() {
        let enemy = &world.enemies[i];
        let hit = world
            .bullets
            .iter()
            .rposition(|b| circles_overlap(enemy.pos, enemy.radius, b.pos, b.radius));

        let Some(j) = hit else {
            continue;
        };

        world.bullets.remove(j);
        report.hits += 1;

        let enemy = &mut world.enemies[i];
        enemy.hp -= 1;
        if enemy.hp <= 0 {
            let enemy = world.enemies.remove(i);
            world.score += SCORE_PER_ENEMY;
            report.destroyed += 1;
            log::debug!("Destroyed '{}' (score {})", enemy.label, world.score);
        }
    }

    report
}

/// Index of the first enemy touching the player, if any
pub fn player_hit(world: &World) -> Option<usize> {
    let player = &world.player;
    world
        .enemies
        .iter()
        .position(|e| circles_overlap(e.pos, e.radius, player.pos, player.radius))
}
