//! The three hand-authored animations.

mod cylinder;
mod helix;
mod polygons;

use std::fmt;
use std::str::FromStr;

pub use cylinder::{CylinderDemo, CylinderParams};
pub use helix::{HelixDemo, HelixParams, BAR_COLOR, BLUE, ORANGE};
pub use polygons::{PolygonFieldDemo, PolygonFieldParams};

use crate::driver::Demo;
use crate::error::{GeometryResult, RenderResult, UnknownDemo};
use crate::render::RenderBackend;

/// Demo selection, as named on a canvas `data-demo` attribute or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoKind {
    #[default]
    Cylinder,
    PolygonField,
    Helix,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Cylinder, DemoKind::PolygonField, DemoKind::Helix];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Cylinder => "cylinder",
            DemoKind::PolygonField => "polygons",
            DemoKind::Helix => "helix",
        }
    }

    /// Builds the demo with its default parameters.
    pub fn build(self) -> GeometryResult<Box<dyn Demo>> {
        Ok(match self {
            DemoKind::Cylinder => Box::new(CylinderDemo::new(CylinderParams::default())?),
            DemoKind::PolygonField => Box::new(PolygonFieldDemo::new(PolygonFieldParams::default())?),
            DemoKind::Helix => Box::new(HelixDemo::new(HelixParams::default())?),
        })
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = UnknownDemo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cylinder" | "cone" => Ok(DemoKind::Cylinder),
            "polygons" | "polygon-field" => Ok(DemoKind::PolygonField),
            "helix" | "dna" => Ok(DemoKind::Helix),
            _ => Err(UnknownDemo(s.to_string())),
        }
    }
}

impl<D: Demo + ?Sized> Demo for Box<D> {
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        (**self).setup(backend)
    }

    fn update(&mut self, elapsed_ms: f64) {
        (**self).update(elapsed_ms)
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        (**self).draw(backend)
    }

    fn clear_color(&self) -> [f32; 4] {
        (**self).clear_color()
    }
}
