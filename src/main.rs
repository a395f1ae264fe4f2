//! Host-side preview: `cargo run -- [demo] [frames]` runs a demo headless at
//! 60 Hz against the in-memory backend and reports what it drew.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::env;
    use std::process;

    use shapes_wasm::{AnimationDriver, DemoKind, FixedStepScheduler, FrameRecorder};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let kind = match args.next().map(|s| s.parse::<DemoKind>()).transpose() {
        Ok(kind) => kind.unwrap_or_default(),
        Err(e) => {
            log::error!("{e}");
            process::exit(2);
        }
    };
    let frames = match args.next().map(|s| s.parse::<usize>()).transpose() {
        Ok(n) => n.unwrap_or(120),
        Err(e) => {
            log::error!("frame count: {e}");
            process::exit(2);
        }
    };

    let mut backend = FrameRecorder::new();
    let result = kind
        .build()
        .map_err(shapes_wasm::RenderError::from)
        .and_then(|demo| AnimationDriver::new(demo, &mut backend, 0.0))
        .and_then(|mut driver| driver.run(&mut FixedStepScheduler::sixty_hz(frames), &mut backend));

    match result {
        Ok(ticks) => {
            let draws = backend.last_frame().map_or(0, |f| f.draws.len());
            println!(
                "{kind}: {ticks} frames, {} buffers, {draws} draw calls per frame",
                backend.buffer_count()
            );
        }
        Err(e) => {
            log::error!("{kind} failed: {e}");
            process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
