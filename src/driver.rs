//! Frame loop driver
//!
//! One [`FrameLoop::frame`] call per display refresh: check the run flag, then
//! hand a [`FrameInfo`] to the step function, which updates and draws each
//! simulation. In the browser the host re-arms `requestAnimationFrame` only
//! while `frame` returns true; elsewhere [`FrameLoop::run`] pulls timestamps
//! from a [`FrameSource`].

use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

use crate::consts::FRAMES_PER_SECOND;
use crate::renderer::{DrawContext, Surface, scene};
use crate::sim::{CatchGame, FireworksShow, SimEvent};

/// Timing for the frame being processed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frames processed before this one
    pub index: u64,
    /// Host timestamp in milliseconds
    pub time_ms: f64,
    /// Time since the previous frame (nominal refresh on the first frame)
    pub dt_ms: f64,
}

/// Something that advances once per frame and can paint itself.
///
/// Updates queue [`SimEvent`]s and nothing else consumes them: whoever steps
/// a simulation must call [`Simulation::drain_events`] after each frame, or
/// the queue keeps growing.
pub trait Simulation {
    fn update(&mut self);
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext);
    /// Take the events queued since the last drain
    fn drain_events(&mut self) -> Vec<SimEvent>;

    /// Update, then draw
    fn step(&mut self, surface: &mut dyn Surface, ctx: &DrawContext) {
        self.update();
        self.draw(surface, ctx);
    }
}

impl<R: Rng> Simulation for FireworksShow<R> {
    fn update(&mut self) {
        FireworksShow::update(self);
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        scene::draw_fireworks(self, surface, ctx);
    }

    fn drain_events(&mut self) -> Vec<SimEvent> {
        FireworksShow::drain_events(self)
    }
}

impl<R: Rng> Simulation for CatchGame<R> {
    fn update(&mut self) {
        CatchGame::update(self);
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext) {
        scene::draw_catch(self, surface, ctx);
    }

    fn drain_events(&mut self) -> Vec<SimEvent> {
        CatchGame::drain_events(self)
    }
}

/// Shared run flag. Clones control the same loop.
#[derive(Debug, Clone)]
pub struct LoopHandle(Rc<Cell<bool>>);

impl LoopHandle {
    pub fn is_running(&self) -> bool {
        self.0.get()
    }

    /// The next frame will not run and the loop won't reschedule
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn resume(&self) {
        self.0.set(true);
    }
}

/// Yields frame timestamps
pub trait FrameSource {
    /// Timestamp (ms) of the next refresh, or None when the source is exhausted
    fn next_frame(&mut self) -> Option<f64>;
}

/// Deterministic clock ticking at a fixed rate, for tests and headless runs
#[derive(Debug, Clone)]
pub struct FixedClock {
    now_ms: f64,
    interval_ms: f64,
    remaining: Option<u64>,
}

impl FixedClock {
    /// Nominal-refresh clock that never runs out
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            interval_ms: 1000.0 / FRAMES_PER_SECOND,
            remaining: None,
        }
    }

    pub fn with_interval(mut self, interval_ms: f64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Stop after `frames` timestamps
    pub fn limited(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for FixedClock {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        self.now_ms += self.interval_ms;
        Some(self.now_ms)
    }
}

/// Frame-paced loop with an externally controllable run flag
#[derive(Debug)]
pub struct FrameLoop {
    handle: LoopHandle,
    frames: u64,
    last_time: Option<f64>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    /// A loop that is running until stopped
    pub fn new() -> Self {
        Self {
            handle: LoopHandle(Rc::new(Cell::new(true))),
            frames: 0,
            last_time: None,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Frames processed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Process one refresh at `time_ms`. Returns false (without stepping) once
    /// stopped; the caller should then stop scheduling frames.
    pub fn frame(&mut self, time_ms: f64, step: impl FnOnce(&FrameInfo)) -> bool {
        if !self.handle.is_running() {
            return false;
        }

        let dt_ms = match self.last_time {
            Some(last) => time_ms - last,
            None => 1000.0 / FRAMES_PER_SECOND,
        };
        self.last_time = Some(time_ms);

        let info = FrameInfo {
            index: self.frames,
            time_ms,
            dt_ms,
        };
        step(&info);
        self.frames += 1;
        true
    }

    /// Drive frames from `source` until it runs dry or the loop is stopped.
    /// Returns the number of frames processed by this call.
    pub fn run<S: FrameSource>(&mut self, source: &mut S, mut step: impl FnMut(&FrameInfo)) -> u64 {
        let start = self.frames;
        while self.handle.is_running() {
            let Some(time_ms) = source.next_frame() else {
                break;
            };
            self.frame(time_ms, &mut step);
        }
        log::debug!("Frame loop ran {} frames", self.frames - start);
        self.frames - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;
    use crate::sim::FireworkColor;

    #[test]
    fn test_run_until_source_exhausted() {
        let mut frame_loop = FrameLoop::new();
        let mut clock = FixedClock::new().with_interval(10.0).limited(5);
        let mut seen = Vec::new();

        let ran = frame_loop.run(&mut clock, |info| seen.push(*info));
        assert_eq!(ran, 5);
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0].index, 0);
        assert_eq!(seen[0].time_ms, 10.0);
        assert_eq!(seen[4].time_ms, 50.0);
        assert!(seen.iter().skip(1).all(|f| f.dt_ms == 10.0));
    }

    #[test]
    fn test_stop_from_inside_step() {
        let mut frame_loop = FrameLoop::new();
        let handle = frame_loop.handle();
        let mut clock = FixedClock::new();

        let ran = frame_loop.run(&mut clock, |info| {
            if info.index == 9 {
                handle.stop();
            }
        });
        assert_eq!(ran, 10);
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn test_stopped_loop_does_not_step() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.handle().stop();

        let mut called = false;
        assert!(!frame_loop.frame(16.0, |_| called = true));
        assert!(!called);
        assert_eq!(frame_loop.frames(), 0);

        // Restarted externally
        frame_loop.handle().resume();
        assert!(frame_loop.frame(32.0, |_| called = true));
        assert!(called);
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn test_events_drained_through_trait() {
        let mut show = FireworksShow::new(4, 800.0, 600.0);
        show.launch_firework(400.0, 600.0, FireworkColor::Gold);

        let mut frame_loop = FrameLoop::new();
        let mut clock = FixedClock::new().limited(crate::consts::ROCKET_FUSE_FRAMES as u64);
        let mut surface = CommandRecorder::new();
        let ctx = DrawContext::default();
        let mut bursts = 0;

        frame_loop.run(&mut clock, |_| {
            let sim: &mut dyn Simulation = &mut show;
            sim.step(&mut surface, &ctx);
            bursts += sim.drain_events().len();
        });

        // Fuse guarantees exactly one burst, and the queue is left empty
        assert_eq!(bursts, 1);
        assert!(show.drain_events().is_empty());
    }

    #[test]
    fn test_simulations_update_then_draw() {
        let mut show = FireworksShow::new(8, 800.0, 600.0);
        show.launch_firework(400.0, 600.0, FireworkColor::Red);
        let mut game = CatchGame::new(8, 800.0, 600.0);
        game.start();

        let mut frame_loop = FrameLoop::new();
        let mut clock = FixedClock::new().limited(120);
        let mut surface = CommandRecorder::new();
        let ctx = DrawContext::default();

        frame_loop.run(&mut clock, |_| {
            surface.clear();
            let sims: [&mut dyn Simulation; 2] = [&mut show, &mut game];
            for sim in sims {
                sim.step(&mut surface, &ctx);
            }
        });

        assert_eq!(show.frame(), 120);
        assert_eq!(game.frame(), 120);
        // Paddle is drawn every frame
        assert!(surface.sprites().any(|(s, _, _)| s == crate::renderer::Sprite::Paddle));
    }
}
