//! Frame driver
//!
//! Takes a monotonic timestamp each tick, turns it into a clamped delta and
//! runs exactly one update + present pair. Simulation and presentation never
//! overlap: both happen on the driver's thread, in that order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_MS, TARGET_FRAME_MS};
use crate::game::Game;
use crate::present::{Frame, Presenter};
use crate::sim::TickInput;

/// Turns timestamps into per-tick deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call, clamped to `MAX_FRAME_MS`.
    /// The first call returns 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let last = self.last_ms.unwrap_or(now_ms);
        self.last_ms = Some(now_ms);
        ((now_ms - last).max(0.0) as f32).min(MAX_FRAME_MS)
    }

    /// Forget the previous timestamp (next delta is 0 again)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Supplies the logical input for each tick.
///
/// Returning `None` ends the run.
pub trait InputSource {
    fn poll(&mut self, frame: &Frame<'_>) -> Option<TickInput>;
}

impl<F> InputSource for F
where
    F: FnMut(&Frame<'_>) -> Option<TickInput>,
{
    fn poll(&mut self, frame: &Frame<'_>) -> Option<TickInput> {
        self(frame)
    }
}

/// Cloneable handle that stops a running driver
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Why `Driver::run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Stopped,
    InputClosed,
}

/// Fixed-rate simulate/present loop
#[derive(Debug)]
pub struct Driver {
    clock: FrameClock,
    stop: StopHandle,
    frame_interval: Duration,
    ticks: u64,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            stop: StopHandle::default(),
            frame_interval: Duration::from_secs_f32(TARGET_FRAME_MS / 1000.0),
            ticks: 0,
        }
    }

    /// Tick cadence for `run`
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Ticks delivered so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One update + present at timestamp `now_ms`.
    ///
    /// Returns false without touching the game once stopped.
    pub fn step<P: Presenter>(
        &mut self,
        game: &mut Game,
        input: &TickInput,
        now_ms: f64,
        presenter: &mut P,
    ) -> bool {
        if self.stop.is_stopped() {
            return false;
        }

        let dt = self.clock.delta(now_ms);
        game.update(input, dt);
        if let Err(e) = presenter.present(&game.frame()) {
            log::warn!("Present error: {e}");
        }
        self.ticks += 1;
        true
    }

    /// Run until stopped or the input source closes
    pub fn run<I, P>(&mut self, game: &mut Game, input: &mut I, presenter: &mut P) -> RunEnd
    where
        I: InputSource + ?Sized,
        P: Presenter,
    {
        let start = Instant::now();
        self.clock.reset();

        loop {
            let tick_start = Instant::now();
            if self.stop.is_stopped() {
                return RunEnd::Stopped;
            }
            let Some(tick_input) = input.poll(&game.frame()) else {
                log::info!("Input closed after {} ticks", self.ticks);
                return RunEnd::InputClosed;
            };

            let now_ms = start.elapsed().as_secs_f64() * 1000.0;
            if !self.step(game, &tick_input, now_ms, presenter) {
                return RunEnd::Stopped;
            }

            if let Some(rest) = self.frame_interval.checked_sub(tick_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
