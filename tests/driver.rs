use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;

use shapes_wasm::error::{RenderError, RenderResult};
use shapes_wasm::geometry::GeometryBuffer;
use shapes_wasm::render::{BufferHandle, DrawCall, DrawRange, Primitive, RenderBackend, ShaderKind};
use shapes_wasm::{AnimationDriver, Demo, FixedStepScheduler, FrameRecorder, FrameScheduler};

/// Records every elapsed value it is handed and draws one triangle.
#[derive(Default)]
struct Tally {
    elapsed: Rc<RefCell<Vec<f64>>>,
    setups: usize,
    buffer: Option<BufferHandle>,
    fail_on_frame: Option<usize>,
}

impl Demo for Tally {
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        self.setups += 1;
        let tri = GeometryBuffer::new(2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
        self.buffer = Some(backend.upload(&tri)?);
        Ok(())
    }

    fn update(&mut self, elapsed_ms: f64) {
        self.elapsed.borrow_mut().push(elapsed_ms);
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        let frame = self.elapsed.borrow().len();
        let count = if Some(frame) == self.fail_on_frame { 4 } else { 3 };
        backend.draw(&DrawCall {
            buffer: self.buffer.unwrap(),
            shader: ShaderKind::ModelColor,
            primitive: Primitive::TriangleFan,
            range: DrawRange::Arrays { offset: 0, count },
            transform: Mat4::IDENTITY,
            color: Some([1.0, 1.0, 1.0]),
        })
    }
}

#[test]
fn fixed_step_scheduler_yields_evenly_spaced_timestamps() {
    let mut scheduler = FixedStepScheduler::new(100.0, 20.0, 3);
    assert_eq!(scheduler.next_frame(), Some(120.0));
    assert_eq!(scheduler.next_frame(), Some(140.0));
    assert_eq!(scheduler.next_frame(), Some(160.0));
    assert_eq!(scheduler.next_frame(), None);
    assert_eq!(scheduler.next_frame(), None);
}

#[test]
fn run_ticks_once_per_scheduled_frame() {
    let tally = Tally::default();
    let elapsed = tally.elapsed.clone();
    let mut backend = FrameRecorder::new();
    let mut driver = AnimationDriver::new(tally, &mut backend, 0.0).unwrap();

    let ticks = driver
        .run(&mut FixedStepScheduler::new(0.0, 10.0, 5), &mut backend)
        .unwrap();

    assert_eq!(ticks, 5);
    assert_eq!(driver.frames(), 5);
    assert_eq!(driver.demo().setups, 1);
    assert_eq!(*elapsed.borrow(), vec![10.0; 5]);
    assert_eq!(backend.frames().len(), 5);
    assert!(backend.frames().iter().all(|f| f.draws.len() == 1));
    assert_eq!(backend.last_frame().unwrap().clear, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn tick_uses_injected_timestamps() {
    let tally = Tally::default();
    let elapsed = tally.elapsed.clone();
    let mut backend = FrameRecorder::new();
    let mut driver = AnimationDriver::new(tally, &mut backend, 500.0).unwrap();

    assert!(driver.tick(516.0, &mut backend).unwrap().is_continue());
    assert!(driver.tick(600.0, &mut backend).unwrap().is_continue());
    assert!(driver.tick(601.5, &mut backend).unwrap().is_continue());
    assert_eq!(*elapsed.borrow(), vec![16.0, 84.0, 1.5]);
}

#[test]
fn stop_handle_ends_the_loop() {
    let mut backend = FrameRecorder::new();
    let mut driver = AnimationDriver::new(Tally::default(), &mut backend, 0.0).unwrap();
    let stop = driver.stop_handle();

    driver.run(&mut FixedStepScheduler::sixty_hz(3), &mut backend).unwrap();
    stop.stop();
    assert!(stop.is_stopped());
    assert!(driver.tick(1000.0, &mut backend).unwrap().is_break());

    let ticks = driver.run(&mut FixedStepScheduler::sixty_hz(100), &mut backend).unwrap();
    assert_eq!(ticks, 0);
    assert_eq!(driver.frames(), 3);
    assert_eq!(backend.frames().len(), 3);
}

#[test]
fn a_failing_tick_halts_the_loop() {
    let tally = Tally {
        fail_on_frame: Some(4),
        ..Tally::default()
    };
    let elapsed = tally.elapsed.clone();
    let mut backend = FrameRecorder::new();
    let mut driver = AnimationDriver::new(tally, &mut backend, 0.0).unwrap();

    let err = driver
        .run(&mut FixedStepScheduler::sixty_hz(10), &mut backend)
        .unwrap_err();

    assert!(matches!(err, RenderError::RangeOutOfBounds { first: 0, end: 4, len: 3 }));
    assert_eq!(elapsed.borrow().len(), 4);
    assert_eq!(driver.frames(), 3);
}

#[test]
fn recorder_rejects_unknown_buffers_and_missing_indices() {
    let mut backend = FrameRecorder::new();
    let tri = GeometryBuffer::new(2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap();
    let handle = backend.upload(&tri).unwrap();
    assert_eq!(backend.buffer(handle), Some(&tri));

    let mut call = DrawCall {
        buffer: handle,
        shader: ShaderKind::FixedMagenta,
        primitive: Primitive::LineLoop,
        range: DrawRange::Elements { count: 3 },
        transform: Mat4::IDENTITY,
        color: None,
    };
    assert!(matches!(backend.draw(&call), Err(RenderError::MissingIndices)));

    let mut other = FrameRecorder::new();
    other.upload(&tri).unwrap();
    other.upload(&tri).unwrap();
    let foreign = other.upload(&tri).unwrap();
    call.buffer = foreign;
    assert!(matches!(backend.draw(&call), Err(RenderError::UnknownBuffer(_))));
}
