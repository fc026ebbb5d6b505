//! ITSM Space Shooter entry point
//!
//! Headless attract mode: the autopilot plays one round and every frame is
//! streamed to stdout as a JSON line for an external renderer or recorder.
//! Logs go to stderr (`RUST_LOG=info` to see them).

use std::io::{self, BufWriter};
use std::time::{SystemTime, UNIX_EPOCH};

use itsm_shooter::Game;
use itsm_shooter::autopilot::Autopilot;
use itsm_shooter::driver::Driver;
use itsm_shooter::present::JsonLinesPresenter;

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("ITSM Space Shooter starting (seed {seed})");

    let mut game = Game::new(seed);
    let mut pilot = Autopilot::default();
    let stdout = io::stdout();
    let mut presenter = JsonLinesPresenter::new(BufWriter::new(stdout.lock()));

    let mut driver = Driver::new();
    let end = driver.run(&mut game, &mut pilot, &mut presenter);

    log::info!(
        "Session ended ({end:?}) after {} ticks (seed {}): {:?}, score {}, {} enemies left",
        driver.ticks(),
        game.seed(),
        game.phase(),
        game.world().score,
        game.world().enemies.len()
    );
}
