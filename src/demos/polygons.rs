//! Field of random regular polygons, each spinning about its own center.

use std::ops::{Range, RangeInclusive};

use glam::{Mat4, Vec3};

use crate::animation::{pivot, AngleAccumulator};
use crate::driver::Demo;
use crate::error::{GeometryError, GeometryResult, RenderResult};
use crate::geometry::{self, GeometryBuffer};
use crate::layout::{LayoutBuilder, LayoutTable};
use crate::render::{BufferHandle, DrawCall, DrawRange, Primitive, RenderBackend, ShaderKind};

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFieldParams {
    pub count: usize,
    pub sides: RangeInclusive<u32>,
    pub radius: Range<f32>,
    /// Centers are drawn from this square, `[-extent, extent]²`.
    pub extent: f32,
    /// Degrees per second, shared by every polygon.
    pub rotation_rate: f32,
    /// Fixed seed for reproducible fields; random when `None`.
    pub seed: Option<u64>,
}

impl Default for PolygonFieldParams {
    fn default() -> Self {
        Self {
            count: 20,
            sides: 3..=9,
            radius: 0.10..0.30,
            extent: 1.0,
            rotation_rate: AngleAccumulator::DEFAULT_RATE,
            seed: None,
        }
    }
}

impl PolygonFieldParams {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rotation_rate(mut self, rate: f32) -> Self {
        self.rotation_rate = rate;
        self
    }
}

pub struct PolygonFieldDemo {
    geometry: GeometryBuffer,
    layout: LayoutTable,
    angle: AngleAccumulator,
    buffer: Option<BufferHandle>,
}

impl PolygonFieldDemo {
    pub fn new(params: PolygonFieldParams) -> GeometryResult<Self> {
        if params.sides.is_empty() {
            return Err(GeometryError::EmptyRange { what: "sides" });
        }
        if *params.sides.start() < 3 {
            return Err(GeometryError::TooFewSides {
                what: "polygon",
                got: *params.sides.start(),
            });
        }
        let radius = &params.radius;
        if !(radius.start.is_finite() && radius.start > 0.0) {
            return Err(GeometryError::NonPositive {
                what: "radius",
                value: radius.start,
            });
        }
        // a zero-width range is allowed and yields equal radii
        if !radius.end.is_finite() || radius.end < radius.start {
            return Err(GeometryError::EmptyRange { what: "radius" });
        }

        let mut rng = match params.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::with_seed(crate::entropy_seed()),
        };
        let span = params.radius.end - params.radius.start;

        let mut builder = LayoutBuilder::new(2)?;
        for _ in 0..params.count {
            let sides = rng.u32(params.sides.clone());
            let radius = rng.f32() * span + params.radius.start;
            let cx = (rng.f32() * 2.0 - 1.0) * params.extent;
            let cy = (rng.f32() * 2.0 - 1.0) * params.extent;
            let color = [rng.f32(), rng.f32(), rng.f32()];

            let points = geometry::regular_polygon([cx, cy], sides, radius)?;
            builder.push_shape(&points, Vec3::new(cx, cy, 0.0), Some(color))?;
        }
        let (geometry, layout) = builder.finish();

        Ok(Self {
            geometry,
            layout,
            angle: AngleAccumulator::new(params.rotation_rate),
            buffer: None,
        })
    }

    pub fn layout(&self) -> &LayoutTable {
        &self.layout
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    pub fn angle(&self) -> f32 {
        self.angle.degrees()
    }

    /// Model matrix of `shape`: rotation about the shape's own center.
    pub fn model(&self, shape: usize) -> Option<Mat4> {
        self.layout
            .get(shape)
            .map(|s| pivot(s.center, Mat4::from_rotation_z(self.angle.radians())))
    }
}

impl Demo for PolygonFieldDemo {
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        self.buffer = Some(backend.upload(&self.geometry)?);
        log::info!(
            "polygon field: {} polygons, {} vertices",
            self.layout.len(),
            self.layout.total_vertices()
        );
        Ok(())
    }

    fn update(&mut self, elapsed_ms: f64) {
        self.angle.advance(elapsed_ms);
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        let Some(buffer) = self.buffer else {
            return Ok(());
        };
        let rotation = Mat4::from_rotation_z(self.angle.radians());
        for shape in &self.layout {
            backend.draw(&DrawCall {
                buffer,
                shader: ShaderKind::ModelColor,
                primitive: Primitive::TriangleFan,
                range: DrawRange::Arrays {
                    offset: shape.offset,
                    count: shape.vertex_count,
                },
                transform: pivot(shape.center, rotation),
                color: shape.color,
            })?;
        }
        Ok(())
    }
}
