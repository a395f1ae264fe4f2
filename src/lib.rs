//! Procedural shape animations for WebGL2: a wireframe cylinder, a field of
//! spinning polygons and a scrolling DNA helix.
//!
//! The host-independent core (geometry, layout, animation state, driver) is
//! plain Rust and is what the native tests exercise. Browser glue lives in the
//! wasm32-only `wasm` module.

pub mod animation;
pub mod demos;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;

pub use demos::DemoKind;
pub use driver::{AnimationDriver, Demo, FixedStepScheduler, FrameScheduler, StopHandle};
pub use error::{GeometryError, RenderError};
pub use render::{FrameRecorder, RenderBackend};

/// Seed for demos that ask for a random layout.
#[cfg(target_arch = "wasm32")]
pub(crate) fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn entropy_seed() -> u64 {
    fastrand::u64(..)
}

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::demos::DemoKind;

    pub mod render;
    mod shaders;

    fn init_logging() {
        console_error_panic_hook::set_once();
        // a second call (e.g. from start_demo) keeps the first logger
        let _ = console_log::init_with_level(log::Level::Info);
    }

    /// Runs the demo named by the `data-demo` attribute of canvas `#c`.
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        init_logging();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id("c") else {
            log::info!("no #c canvas, waiting for start_demo");
            return Ok(());
        };
        let kind = match element.get_attribute("data-demo") {
            Some(name) => name.parse::<DemoKind>().map_err(|e| e.to_string())?,
            None => DemoKind::default(),
        };
        render::start(element.dyn_into::<web_sys::HtmlCanvasElement>()?, kind)
    }

    /// Starts `demo` on the canvas with id `canvas_id`.
    #[wasm_bindgen]
    pub fn start_demo(canvas_id: &str, demo: &str) -> Result<(), JsValue> {
        init_logging();
        let kind = demo.parse::<DemoKind>().map_err(|e| e.to_string())?;
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        render::start(canvas, kind)
    }
}
