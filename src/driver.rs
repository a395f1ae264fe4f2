//! Frame loop plumbing shared by every demo.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::animation::FrameClock;
use crate::error::RenderResult;
use crate::render::RenderBackend;

/// A self-contained animation: geometry set up once, then updated and drawn
/// every frame.
pub trait Demo {
    /// Uploads the demo's geometry. Called exactly once before the first tick.
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()>;
    /// Advances the animation state by `elapsed_ms` milliseconds.
    fn update(&mut self, elapsed_ms: f64);
    /// Issues this frame's draw calls.
    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()>;

    fn clear_color(&self) -> [f32; 4] {
        [0.0, 0.0, 0.0, 1.0]
    }
}

/// Source of frame timestamps for [`AnimationDriver::run`].
pub trait FrameScheduler {
    /// Timestamp in milliseconds of the next frame, `None` once the host is
    /// done producing frames.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Synchronous stepper producing `frames` timestamps `step_ms` apart.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    now_ms: f64,
    step_ms: f64,
    remaining: usize,
}

impl FixedStepScheduler {
    pub fn new(start_ms: f64, step_ms: f64, frames: usize) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
            remaining: frames,
        }
    }

    /// 60 Hz starting at `t = 0`.
    pub fn sixty_hz(frames: usize) -> Self {
        Self::new(0.0, 1000.0 / 60.0, frames)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.now_ms += self.step_ms;
        Some(self.now_ms)
    }
}

/// Cloneable flag that ends the loop before its next tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Owns a demo together with its clock and drives it one tick at a time.
pub struct AnimationDriver<D> {
    demo: D,
    clock: FrameClock,
    stop: StopHandle,
    frames: u64,
}

impl<D: Demo> AnimationDriver<D> {
    /// Runs the demo's setup and starts the clock at `now_ms`.
    pub fn new(mut demo: D, backend: &mut dyn RenderBackend, now_ms: f64) -> RenderResult<Self> {
        demo.setup(backend)?;
        Ok(Self {
            demo,
            clock: FrameClock::new(now_ms),
            stop: StopHandle::default(),
            frames: 0,
        })
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One frame: measure elapsed time, advance state, redraw.
    ///
    /// Errors are returned as-is; the caller must not schedule another tick
    /// after one.
    pub fn tick(
        &mut self,
        now_ms: f64,
        backend: &mut dyn RenderBackend,
    ) -> RenderResult<ControlFlow<()>> {
        if self.stop.is_stopped() {
            return Ok(ControlFlow::Break(()));
        }

        let elapsed = self.clock.tick(now_ms);
        self.demo.update(elapsed);
        backend.begin_frame(self.demo.clear_color())?;
        self.demo.draw(backend)?;
        self.frames += 1;
        log::trace!("frame {} at {:.1}ms (+{:.2}ms)", self.frames, now_ms, elapsed);

        Ok(ControlFlow::Continue(()))
    }

    /// Ticks until the scheduler runs dry, a stop is requested, or a tick fails.
    pub fn run<S: FrameScheduler>(
        &mut self,
        scheduler: &mut S,
        backend: &mut dyn RenderBackend,
    ) -> RenderResult<u64> {
        let start = self.frames;
        while let Some(now) = scheduler.next_frame() {
            if self.tick(now, backend)?.is_break() {
                log::info!("animation stopped after {} frames", self.frames - start);
                break;
            }
        }
        Ok(self.frames - start)
    }
}
