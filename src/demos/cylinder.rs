//! Rotating wireframe n-gon prism.

use glam::{Mat4, Vec3};

use crate::animation::AngleAccumulator;
use crate::driver::Demo;
use crate::error::RenderResult;
use crate::geometry::{self, GeometryBuffer};
use crate::render::{BufferHandle, DrawCall, DrawRange, Primitive, RenderBackend, ShaderKind};

#[derive(Debug, Clone, PartialEq)]
pub struct CylinderParams {
    /// Sides of the n-gon.
    pub segments: u32,
    pub height: f32,
    pub radius: f32,
    /// Spin about y, degrees per second.
    pub yaw_rate: f32,
    /// Spin about x, degrees per second.
    pub pitch_rate: f32,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            segments: 20,
            height: 6.0,
            radius: 2.0,
            // 0.5° and 1° per frame at 60 Hz
            yaw_rate: 30.0,
            pitch_rate: 60.0,
            fov_y_degrees: 50.0,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
            eye: Vec3::new(4.0, 5.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl CylinderParams {
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_size(mut self, height: f32, radius: f32) -> Self {
        self.height = height;
        self.radius = radius;
        self
    }

    pub fn with_rates(mut self, yaw_rate: f32, pitch_rate: f32) -> Self {
        self.yaw_rate = yaw_rate;
        self.pitch_rate = pitch_rate;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Projection times view.
    pub fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        proj * Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

pub struct CylinderDemo {
    params: CylinderParams,
    mesh: GeometryBuffer,
    view_projection: Mat4,
    yaw: AngleAccumulator,
    pitch: AngleAccumulator,
    buffer: Option<BufferHandle>,
}

impl CylinderDemo {
    pub fn new(params: CylinderParams) -> crate::error::GeometryResult<Self> {
        let mesh = geometry::cylinder(params.segments, params.height, params.radius)?;
        Ok(Self {
            view_projection: params.view_projection(),
            yaw: AngleAccumulator::new(params.yaw_rate),
            pitch: AngleAccumulator::new(params.pitch_rate),
            mesh,
            params,
            buffer: None,
        })
    }

    pub fn params(&self) -> &CylinderParams {
        &self.params
    }

    pub fn mesh(&self) -> &GeometryBuffer {
        &self.mesh
    }

    pub fn yaw(&self) -> f32 {
        self.yaw.degrees()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch.degrees()
    }

    pub fn mvp(&self) -> Mat4 {
        self.view_projection
            * Mat4::from_rotation_y(self.yaw.radians())
            * Mat4::from_rotation_x(self.pitch.radians())
    }
}

impl Demo for CylinderDemo {
    fn setup(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        self.buffer = Some(backend.upload(&self.mesh)?);
        log::info!(
            "cylinder: {} vertices, {} indices",
            self.mesh.vertex_count(),
            self.mesh.indices().len()
        );
        Ok(())
    }

    fn update(&mut self, elapsed_ms: f64) {
        self.yaw.advance(elapsed_ms);
        self.pitch.advance(elapsed_ms);
    }

    fn draw(&self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        let Some(buffer) = self.buffer else {
            return Ok(());
        };
        backend.draw(&DrawCall {
            buffer,
            shader: ShaderKind::FixedMagenta,
            primitive: Primitive::LineLoop,
            range: DrawRange::Elements {
                count: self.mesh.indices().len(),
            },
            transform: self.mvp(),
            color: None,
        })
    }
}
