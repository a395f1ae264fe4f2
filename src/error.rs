//! Error types for geometry setup and the rendering backend.

use thiserror::Error;

/// Shape parameters rejected by the geometry builder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{what} needs at least 3 sides, got {got}")]
    TooFewSides { what: &'static str, got: u32 },
    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("bar ratio must be in (0, 1], got {0}")]
    RatioOutOfRange(f32),
    #[error("shape needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("{what} range is empty or not finite")]
    EmptyRange { what: &'static str },
    #[error("vertices must have 2 or 3 components, got {0}")]
    UnsupportedComponents(usize),
    #[error("vertex has {got} components, buffer expects {expected}")]
    ComponentMismatch { expected: usize, got: usize },
    #[error("mesh needs {0} vertices, more than a 16-bit index can address")]
    IndexOverflow(usize),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// Failures raised by a [`RenderBackend`](crate::render::RenderBackend).
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to acquire rendering context: {0}")]
    Context(String),
    #[error("Failed to compile shader: {0}")]
    Shader(String),
    #[error("Failed to link program: {0}")]
    Program(String),
    #[error("Failed to create buffer: {0}")]
    Buffer(String),
    #[error("Unknown buffer handle {0:?}")]
    UnknownBuffer(crate::render::BufferHandle),
    #[error("Draw range {first}..{end} exceeds buffer of {len} elements")]
    RangeOutOfBounds { first: usize, end: usize, len: usize },
    #[error("Indexed draw on a buffer without indices")]
    MissingIndices,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Demo name that matches none of the known demos.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown demo `{0}` (expected cylinder, polygons or helix)")]
pub struct UnknownDemo(pub String);
