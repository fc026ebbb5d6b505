//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order of enemies and bullets)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{Aggression, separate, steer_enemy};
pub use collision::{HitReport, circles_overlap, player_hit, resolve_bullet_hits};
pub use state::{Bullet, ENEMY_LABELS, Enemy, Phase, Player, World, spawn_enemies};
pub use tick::{RoundClock, TickInput, advance};
