//! The seam between the animation core and whatever puts pixels on screen.

use glam::Mat4;

use crate::error::{RenderError, RenderResult};
use crate::geometry::GeometryBuffer;

/// Opaque id of an uploaded [`GeometryBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub(crate) u32);

/// How a run of vertices is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    LineLoop,
    TriangleFan,
    TriangleStrip,
}

/// The two fixed shader programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Position only, one model-view-projection matrix, constant magenta.
    FixedMagenta,
    /// Position plus a per-draw color, one model matrix.
    ModelColor,
}

/// Which part of the buffer a draw reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRange {
    /// `count` vertices starting at vertex `offset`.
    Arrays { offset: usize, count: usize },
    /// The first `count` entries of the buffer's index list.
    Elements { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub buffer: BufferHandle,
    pub shader: ShaderKind,
    pub primitive: Primitive,
    pub range: DrawRange,
    pub transform: Mat4,
    pub color: Option<[f32; 3]>,
}

/// Rendering collaborator used by the demos.
pub trait RenderBackend {
    /// Hands immutable geometry over to the backend for the rest of the run.
    fn upload(&mut self, geometry: &GeometryBuffer) -> RenderResult<BufferHandle>;
    /// Clears the target before the frame's draws.
    fn begin_frame(&mut self, clear: [f32; 4]) -> RenderResult<()>;
    fn draw(&mut self, call: &DrawCall) -> RenderResult<()>;
}

/// Checks a draw range against the geometry it targets.
pub fn check_range(geometry: &GeometryBuffer, range: DrawRange) -> RenderResult<()> {
    match range {
        DrawRange::Arrays { offset, count } => {
            let len = geometry.vertex_count();
            if offset + count > len {
                return Err(RenderError::RangeOutOfBounds {
                    first: offset,
                    end: offset + count,
                    len,
                });
            }
        }
        DrawRange::Elements { count } => {
            if !geometry.is_indexed() {
                return Err(RenderError::MissingIndices);
            }
            let len = geometry.indices().len();
            if count > len {
                return Err(RenderError::RangeOutOfBounds { first: 0, end: count, len });
            }
        }
    }
    Ok(())
}

/// Frame captured by [`FrameRecorder`].
#[derive(Debug, Clone, Default)]
pub struct RecordedFrame {
    pub clear: [f32; 4],
    pub draws: Vec<DrawCall>,
}

/// In-memory backend: keeps uploaded geometry and every frame's draws.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    buffers: Vec<GeometryBuffer>,
    frames: Vec<RecordedFrame>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, handle: BufferHandle) -> Option<&GeometryBuffer> {
        self.buffers.get(handle.0 as usize)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl RenderBackend for FrameRecorder {
    fn upload(&mut self, geometry: &GeometryBuffer) -> RenderResult<BufferHandle> {
        let handle = BufferHandle(self.buffers.len() as u32);
        self.buffers.push(geometry.clone());
        log::debug!(
            "recorded buffer {:?}: {} vertices, {} indices",
            handle,
            geometry.vertex_count(),
            geometry.indices().len()
        );
        Ok(handle)
    }

    fn begin_frame(&mut self, clear: [f32; 4]) -> RenderResult<()> {
        self.frames.push(RecordedFrame {
            clear,
            draws: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) -> RenderResult<()> {
        let geometry = self
            .buffers
            .get(call.buffer.0 as usize)
            .ok_or(RenderError::UnknownBuffer(call.buffer))?;
        check_range(geometry, call.range)?;
        if self.frames.is_empty() {
            self.frames.push(RecordedFrame::default());
        }
        let last = self.frames.len() - 1;
        self.frames[last].draws.push(*call);
        Ok(())
    }
}
