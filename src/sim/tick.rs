//! Simulation tick
//!
//! Advances one playing tick. Step order matters and is fixed:
//! timer, player, firing, bullets, enemy AI, separation, bullet hits,
//! player hits, win check.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ai::{Aggression, separate, steer_enemy};
use super::collision::{player_hit, resolve_bullet_hits};
use super::state::{Bullet, Phase, World};
use crate::clamp;
use crate::consts::*;

/// Logical input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
    /// Start/retry (one-shot, only read outside Playing)
    pub confirm: bool,
    /// Click in arena coordinates (one-shot, only read outside Playing)
    pub click: Option<glam::Vec2>,
}

/// Timers carried from tick to tick alongside the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    /// Countdown, never negative
    pub remaining_ms: f32,
    /// Time until the next shot is allowed; may run negative while idle
    pub fire_cooldown_ms: f32,
}

impl RoundClock {
    pub fn new() -> Self {
        Self {
            remaining_ms: ROUND_MS,
            fire_cooldown_ms: 0.0,
        }
    }

    pub fn in_panic(&self) -> bool {
        self.remaining_ms < PANIC_WINDOW_MS
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the world by one tick of `elapsed_ms`.
///
/// Only meaningful while playing. Returns the phase after the tick:
/// `Playing`, or the `Won`/`Lost` outcome.
pub fn advance<R: Rng + ?Sized>(
    world: &mut World,
    clock: &mut RoundClock,
    input: &TickInput,
    elapsed_ms: f32,
    rng: &mut R,
) -> Phase {
    clock.remaining_ms = (clock.remaining_ms - elapsed_ms).max(0.0);
    if clock.remaining_ms == 0.0 {
        return Phase::Lost;
    }

    move_player(world, input);
    fire(world, clock, input, elapsed_ms);

    for bullet in &mut world.bullets {
        bullet.pos += bullet.vel;
    }
    world.bullets.retain(Bullet::in_bounds);

    let aggression = Aggression::for_remaining(clock.remaining_ms);
    let target = world.player.pos;
    for enemy in &mut world.enemies {
        steer_enemy(enemy, target, elapsed_ms, aggression, rng);
    }
    separate(&mut world.enemies);

    let hits = resolve_bullet_hits(world);
    if hits.hits > 0 {
        log::debug!(
            "{} hits, {} destroyed, {} enemies left",
            hits.hits,
            hits.destroyed,
            world.enemies.len()
        );
    }

    if player_hit(world).is_some() {
        return Phase::Lost;
    }

    if world.enemies.is_empty() {
        Phase::Won
    } else {
        Phase::Playing
    }
}

/// Unit steps per held direction. Diagonals are not normalized.
fn move_player(world: &mut World, input: &TickInput) {
    let player = &mut world.player;
    if input.left {
        player.pos.x -= PLAYER_SPEED;
    }
    if input.right {
        player.pos.x += PLAYER_SPEED;
    }
    if input.up {
        player.pos.y -= PLAYER_SPEED;
    }
    if input.down {
        player.pos.y += PLAYER_SPEED;
    }

    let r = player.radius;
    player.pos.x = clamp(player.pos.x, r, ARENA_WIDTH - r);
    player.pos.y = clamp(player.pos.y, r, ARENA_HEIGHT - r);
}

/// At most one bullet per tick; the cooldown resets to the full interval
fn fire(world: &mut World, clock: &mut RoundClock, input: &TickInput, elapsed_ms: f32) {
    clock.fire_cooldown_ms -= elapsed_ms;
    if input.fire && clock.fire_cooldown_ms <= 0.0 {
        world.bullets.push(Bullet::fired_from(world.player.muzzle()));
        clock.fire_cooldown_ms = FIRE_INTERVAL_MS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Player};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn enemy(pos: Vec2, hp: i32) -> Enemy {
        Enemy {
            pos,
            vel: Vec2::ZERO,
            radius: 18.0,
            hp,
            label: "CMDB Drift".to_string(),
            dash_ms: 0.0,
        }
    }

    /// A world with one harmless enemy parked in a corner so the round stays open
    fn quiet_world() -> World {
        World {
            enemies: vec![enemy(Vec2::new(60.0, 60.0), 3)],
            ..World::default()
        }
    }

    #[test]
    fn test_timer_expiry_early_exit() {
        let mut rng = rng();
        let mut world = World::spawn_level(&mut rng);
        let mut clock = RoundClock {
            remaining_ms: 50.0,
            ..RoundClock::new()
        };
        let before = world.clone();

        let input = TickInput {
            fire: true,
            left: true,
            ..Default::default()
        };
        let phase = advance(&mut world, &mut clock, &input, 100.0, &mut rng);

        assert_eq!(phase, Phase::Lost);
        assert_eq!(clock.remaining_ms, 0.0);
        assert_eq!(world, before);
        // Cooldown untouched by the early exit
        assert_eq!(clock.fire_cooldown_ms, 0.0);
    }

    #[test]
    fn test_empty_world_wins() {
        let mut world = World::default();
        let mut clock = RoundClock::new();
        let phase = advance(&mut world, &mut clock, &TickInput::default(), 16.0, &mut rng());
        assert_eq!(phase, Phase::Won);
    }

    #[test]
    fn test_enemy_on_player_loses() {
        let mut world = World::spawn_level(&mut rng());
        let player_pos = world.player.pos;
        world.enemies.push(enemy(player_pos, 2));

        let mut clock = RoundClock::new();
        let phase = advance(&mut world, &mut clock, &TickInput::default(), 16.0, &mut rng());
        assert_eq!(phase, Phase::Lost);
    }

    #[test]
    fn test_point_blank_kill() {
        let mut world = World::default();
        world.player.pos = Vec2::new(512.0, 600.0);
        world.enemies.push(enemy(Vec2::new(300.0, 200.0), 1));
        world.enemies.push(enemy(Vec2::new(900.0, 100.0), 3));
        // Bullet placed one step below the enemy so it lands on it after integrating
        world.bullets.push(Bullet::fired_from(Vec2::new(300.0, 200.0 + BULLET_SPEED)));

        let mut clock = RoundClock::new();
        let phase = advance(&mut world, &mut clock, &TickInput::default(), 16.0, &mut rng());

        assert_eq!(phase, Phase::Playing);
        assert_eq!(world.score, SCORE_PER_ENEMY);
        assert!(world.bullets.is_empty());
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].hp, 3);
    }

    #[test]
    fn test_last_kill_wins() {
        let mut world = World::default();
        world.enemies.push(enemy(Vec2::new(300.0, 200.0), 1));
        world.bullets.push(Bullet::fired_from(Vec2::new(300.0, 200.0 + BULLET_SPEED)));

        let mut clock = RoundClock::new();
        let phase = advance(&mut world, &mut clock, &TickInput::default(), 16.0, &mut rng());
        assert_eq!(phase, Phase::Won);
        assert_eq!(world.score, SCORE_PER_ENEMY);
    }

    #[test]
    fn test_overlapping_enemies_pushed_apart() {
        let mut world = World::default();
        world.player.pos = Vec2::new(510.0, 600.0);
        world.enemies.push(enemy(Vec2::new(500.0, 100.0), 2));
        world.enemies.push(enemy(Vec2::new(520.0, 100.0), 2));
        let separation = world.enemies[0].pos - world.enemies[1].pos;
        let rel_before = world.enemies[0].vel - world.enemies[1].vel;

        let mut clock = RoundClock::new();
        advance(&mut world, &mut clock, &TickInput::default(), 16.0, &mut rng());

        let rel_after = world.enemies[0].vel - world.enemies[1].vel;
        assert!(separation.dot(rel_after - rel_before) > 0.0);
    }

    #[test]
    fn test_diagonal_movement_is_unnormalized() {
        let mut world = quiet_world();
        let start = world.player.pos;
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        advance(&mut world, &mut RoundClock::new(), &input, 16.0, &mut rng());

        let moved = world.player.pos - start;
        assert_eq!(moved, Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut world = quiet_world();
        let start = world.player.pos;
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        advance(&mut world, &mut RoundClock::new(), &input, 16.0, &mut rng());
        assert_eq!(world.player.pos, start);
    }

    #[test]
    fn test_fire_spawns_above_nose() {
        let mut world = quiet_world();
        let mut clock = RoundClock::new();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        advance(&mut world, &mut clock, &input, 16.0, &mut rng());

        assert_eq!(world.bullets.len(), 1);
        let player = &world.player;
        let expected = Vec2::new(
            player.pos.x,
            player.pos.y - player.radius - BULLET_NOSE_GAP - BULLET_SPEED,
        );
        assert_eq!(world.bullets[0].pos, expected);
        assert_eq!(clock.fire_cooldown_ms, FIRE_INTERVAL_MS);
    }

    #[test]
    fn test_fire_cadence() {
        let mut world = quiet_world();
        let mut clock = RoundClock::new();
        let mut rng = rng();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };

        // 16ms ticks: shots at t=16, then once the 150ms cooldown has drained
        let mut shot_times = Vec::new();
        let mut t = 0.0;
        for _ in 0..40 {
            t += 16.0;
            let before = world.bullets.len();
            advance(&mut world, &mut clock, &input, 16.0, &mut rng);
            if world.bullets.len() > before {
                shot_times.push(t);
            }
        }

        assert!(shot_times.len() >= 3);
        for pair in shot_times.windows(2) {
            assert!(pair[1] - pair[0] >= FIRE_INTERVAL_MS);
        }
    }

    #[test]
    fn test_idle_cooldown_gives_single_shot() {
        let mut world = quiet_world();
        let mut clock = RoundClock {
            fire_cooldown_ms: -5000.0,
            ..RoundClock::new()
        };
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        advance(&mut world, &mut clock, &input, 33.0, &mut rng());
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(clock.fire_cooldown_ms, FIRE_INTERVAL_MS);
    }

    #[test]
    fn test_bullets_culled_past_top() {
        let mut world = quiet_world();
        world.bullets.push(Bullet::fired_from(Vec2::new(700.0, -1.5)));
        world.bullets.push(Bullet::fired_from(Vec2::new(700.0, 300.0)));
        advance(&mut world, &mut RoundClock::new(), &TickInput::default(), 16.0, &mut rng());
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].pos.y, 300.0 - BULLET_SPEED);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(4242);
        let mut rng2 = Pcg32::seed_from_u64(4242);
        let mut world1 = World::spawn_level(&mut rng1);
        let mut world2 = World::spawn_level(&mut rng2);
        let mut clock1 = RoundClock::new();
        let mut clock2 = RoundClock::new();

        let inputs = [
            TickInput {
                fire: true,
                left: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..60 {
            for input in &inputs {
                let p1 = advance(&mut world1, &mut clock1, input, 16.0, &mut rng1);
                let p2 = advance(&mut world2, &mut clock2, input, 16.0, &mut rng2);
                assert_eq!(p1, p2);
            }
        }
        assert_eq!(world1, world2);
        assert_eq!(clock1, clock2);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, fire)| TickInput {
                left,
                right,
                up,
                down,
                fire,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            x in -200.0f32..1300.0,
            y in -200.0f32..900.0,
            inputs in prop::collection::vec(arb_input(), 1..50),
        ) {
            let mut world = quiet_world();
            world.player = Player { pos: Vec2::new(x, y), ..Player::spawn() };
            // Keep the parked enemy out of the way of the player
            world.enemies[0].pos = Vec2::new(-500.0, -500.0);
            let mut clock = RoundClock::new();
            let mut rng = rng();

            for input in &inputs {
                advance(&mut world, &mut clock, input, 16.0, &mut rng);
                let p = &world.player;
                prop_assert!(p.pos.x >= p.radius && p.pos.x <= ARENA_WIDTH - p.radius);
                prop_assert!(p.pos.y >= p.radius && p.pos.y <= ARENA_HEIGHT - p.radius);
            }
        }

        #[test]
        fn prop_timer_monotonic_and_clamped(
            start in 0.0f32..2000.0,
            steps in prop::collection::vec(0.0f32..=MAX_FRAME_MS, 1..200),
        ) {
            let mut clock = RoundClock { remaining_ms: start, ..RoundClock::new() };
            let mut world = quiet_world();
            world.enemies[0].pos = Vec2::new(-500.0, -500.0);
            let mut rng = rng();

            for dt in steps {
                let before = clock.remaining_ms;
                let phase = advance(&mut world, &mut clock, &TickInput::default(), dt, &mut rng);
                prop_assert_eq!(clock.remaining_ms, (before - dt).max(0.0));
                prop_assert!(clock.remaining_ms <= before);
                if clock.remaining_ms == 0.0 {
                    prop_assert_eq!(phase, Phase::Lost);
                    break;
                }
            }
        }
    }
}
