//! Two scrolling strands of bars and circles pulsing with a traveling wave.

use glam::{Mat4, Vec3};

use crate::animation::{pivot, TravelingWave, WrappingOffset};
use crate::driver::Demo;
use crate::error::{GeometryError, GeometryResult, RenderResult};
use crate::geometry::{self, GeometryBuffer};
use crate::layout::{LayoutBuilder, LayoutTable};
use crate::render::{BufferHandle, DrawCall, DrawRange, Primitive, RenderBackend, ShaderKind};

pub const BAR_COLOR: [f32; 3] = [1.0, 1.0, 0.2];
pub const BLUE: [f32; 3] = [61.0 / 255.0, 171.0 / 255.0, 252.0 / 255.0];
pub const ORANGE: [f32; 3] = [1.0, 120.0 / 255.0, 51.0 / 255.0];

#[derive(Debug, Clone, PartialEq)]
pub struct HelixParams {
    /// Bars per strand are `2·half + 1`.
    pub half: i32,
    pub bar_width: f32,
    /// Vertical pitch between bars.
    pub bar_height: f32,
    /// Fraction of the pitch a bar fills.
    pub bar_ratio: f32,
    pub circle_sides: u32,
    pub circle_radius: f32,
    /// Upward scroll, units per second.
    pub scroll_rate: f32,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            half: 7,
            bar_width: 1.2,
            bar_height: 0.3,
            bar_ratio: 0.35,
            circle_sides: 30,
            circle_radius: 0.12,
            scroll_rate: 0.2,
        }
    }
}

impl HelixParams {
    pub fn with_half(mut self, half: i32) -> Self {
        self.half = half;
        self
    }

    pub fn with_scroll_rate(mut self, rate: f32) -> Self {
        self.scroll_rate = rate;
        self
    }

    /// Scroll bound: one full strand length above and below the origin.
    pub fn extent(&self) -> f32 {
        self.half as f32 * self.bar_height * 2.0
    }
}

struct Buffers {
    bars: BufferHandle,
    circles: BufferHandle,
}

pub struct HelixDemo {
    params: HelixParams,
    bar_geometry: GeometryBuffer,
    bars: LayoutTable,
    circle_geometry: GeometryBuffer,
    circles: LayoutTable,
    wave: TravelingWave,
    /// Seconds since start.
    time: f32,
    strands: [WrappingOffset; 2],
    buffers: Option<Buffers>,
}

impl HelixDemo {
    pub fn new(params: HelixParams) -> GeometryResult<Self> {
        if params.half < 1 {
            return Err(GeometryError::NonPositive {
                what: "half",
                value: params.half as f32,
            });
        }

        let mut bars = LayoutBuilder::new(2)?;
        let mut circles = LayoutBuilder::new(2)?;
        for i in -params.half..=params.half {
            let center = [0.0, i as f32 * params.bar_height];
            let pivot_point = Vec3::new(center[0], center[1], 0.0);

            let quad = geometry::quad(center, params.bar_width, params.bar_height, params.bar_ratio)?;
            bars.push_shape(&quad, pivot_point, Some(BAR_COLOR))?;

            let circle = geometry::regular_polygon(center, params.circle_sides, params.circle_radius)?;
            circles.push_shape(&circle, pivot_point, None)?;
        }
        let (bar_geometry, bars) = bars.finish();
        let (circle_geometry, circles) = circles.finish();

        let extent = params.extent();
        let rate = params.scroll_rate;
        let strand = |start| WrappingOffset::new(start, rate, -extent, extent);

        Ok(Self {
            wave: TravelingWave::new(params.half),
            time: 0.0,
            strands: [strand(0.0), strand(-extent)],
            bar_geometry,
            bars,
            circle_geometry,
            circles,
            params,
            buffers: None,
        })
    }

    pub fn bars(&self) -> &LayoutTable {
        &self.bars
    }

    pub fn circles(&self) -> &LayoutTable {
        &self.circles
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current vertical offsets of both strands.
    pub fn strand_offsets(&self) -> [f32; 2] {
        [self.strands[0].value(), self.strands[1].value()]
    }

    /// Horizontal scale of bar `i` right now.
    pub fn bar_scale(&self, i: i32) -> f32 {
        self.wave.scale(i, self.time)
    }

    fn draw_bars(&self, backend: &mut dyn RenderBackend, buffer: BufferHandle, ty: f32) -> RenderResult<()> {
        let lift = Mat4::from_translation(Vec3::new(0.0, ty, 0.0));
        for (bar, i) in self.bars.iter().zip(self.wave.indices()) {
            let sx = self.wave.scale(i, self.time);
            backend.draw(&DrawCall {
                buffer,
                shader: ShaderKind::ModelColor,
                primitive: Primitive::TriangleStrip,
                range: DrawRange::Arrays {
                    offset: bar.offset,
                    count: bar.vertex_count,
                },
                transform: lift * pivot(bar.center, Mat4::from_scale(Vec3::new(sx, 1.0, 1.0))),
                color: bar.color,
            })?;
        }
        Ok(())
    }

    /// Circles ride the bar ends: `sign` picks the right (+1) or left (-1) end.
    fn draw_circles(
        &self,
        backend: &mut dyn RenderBackend,
        buffer: BufferHandle,
        ty: f32,
        sign: f32,
        color: [f32; 3],
    ) -> RenderResult<()> {
        for (circle, i) in self.circles.iter().zip(self.wave.indices()) {
            let dx = sign * self.wave.scale(i, self.time) * self.params.bar_width * 0.5;
            backend.draw(&DrawCall {
                buffer,
                shader: ShaderKind::ModelColor,
                primitive: Primitive::TriangleFan,
                range: DrawRange::Arrays {
                    offset: circle.offset,
                    count: circle.vertex_count,
                },
                transform: Mat4::from_translation(Vec3::new(dx, ty, 0.0)),
                color: Some(color),
            })?;
        }
        Ok(())
    }
}

impl Demo for HelixDemo {
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        let bars = backend.upload(&self.bar_geometry)?;
        let circles = backend.upload(&self.circle_geometry)?;
        self.buffers = Some(Buffers { bars, circles });
        log::info!(
            "helix: {} bars ({} vertices), {} circles ({} vertices)",
            self.bars.len(),
            self.bars.total_vertices(),
            self.circles.len(),
            self.circles.total_vertices()
        );
        Ok(())
    }

    fn update(&mut self, elapsed_ms: f64) {
        let dt = (elapsed_ms * 0.001) as f32;
        self.time += dt;
        for strand in &mut self.strands {
            strand.advance(dt);
        }
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        let Some(buffers) = &self.buffers else {
            return Ok(());
        };
        let offsets = self.strand_offsets();
        for ty in offsets {
            self.draw_bars(backend, buffers.bars, ty)?;
        }
        for ty in offsets {
            self.draw_circles(backend, buffers.circles, ty, 1.0, BLUE)?;
            self.draw_circles(backend, buffers.circles, ty, -1.0, ORANGE)?;
        }
        Ok(())
    }
}
