//! Procedural meshes.
//!
//! Every builder is a pure function from shape parameters to vertex data. The
//! vertex order is part of the contract: draw calls address vertices by their
//! position in these lists, and the fan/strip primitives rely on it.

use std::f32::consts::TAU;

use crate::error::{GeometryError, GeometryResult};

/// Immutable vertex (and optional index) data, built once and uploaded once.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    components: usize,
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

impl GeometryBuffer {
    /// Wraps flat coordinates with `components` floats per vertex.
    pub fn new(components: usize, vertices: Vec<f32>) -> GeometryResult<Self> {
        check_components(components)?;
        if vertices.len() % components != 0 {
            return Err(GeometryError::ComponentMismatch {
                expected: components,
                got: vertices.len() % components,
            });
        }
        Ok(Self {
            components,
            vertices,
            indices: Vec::new(),
        })
    }

    /// For callers that already hold validated, whole-vertex data.
    pub(crate) fn packed(components: usize, vertices: Vec<f32>) -> Self {
        Self {
            components,
            vertices,
            indices: Vec::new(),
        }
    }

    pub fn with_indices(mut self, indices: Vec<u16>) -> Self {
        self.indices = indices;
        self
    }

    /// Floats per vertex (2 or 3).
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.components
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// The `i`-th vertex as a slice of `components` floats.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let start = i * self.components;
        self.vertices.get(start..start + self.components)
    }

    pub fn max_index(&self) -> Option<u16> {
        self.indices.iter().copied().max()
    }

    /// Vertex data as raw bytes for `bufferData`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for `bufferData`.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

pub(crate) fn check_components(components: usize) -> GeometryResult<()> {
    if !(2..=3).contains(&components) {
        return Err(GeometryError::UnsupportedComponents(components));
    }
    Ok(())
}

fn check_sides(what: &'static str, sides: u32) -> GeometryResult<()> {
    if sides < 3 {
        return Err(GeometryError::TooFewSides { what, got: sides });
    }
    Ok(())
}

fn check_positive(what: &'static str, value: f32) -> GeometryResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(GeometryError::NonPositive { what, value });
    }
    Ok(())
}

/// Wireframe n-gon prism around the y axis.
///
/// Layout (with `s = segments`):
/// - `0..=s`: top ring at `y = height/2`, point `s` duplicates point 0
/// - `s+1..=2s+1`: bottom ring at `y = -height/2`, same closing duplicate
/// - `2s+2`: top center, `2s+3`: bottom center
///
/// Indices come in triples, one side triangle and one lid triangle per wedge,
/// first for the upper half of every wedge and then for the lower half.
/// The whole list is meant to be drawn as a single line loop.
pub fn cylinder(segments: u32, height: f32, radius: f32) -> GeometryResult<GeometryBuffer> {
    check_sides("cylinder", segments)?;
    check_positive("height", height)?;
    check_positive("radius", radius)?;

    let s = segments as usize;
    let vertex_count = 2 * (s + 1) + 2;
    if vertex_count > u16::MAX as usize + 1 {
        return Err(GeometryError::IndexOverflow(vertex_count));
    }

    let mut vertices = Vec::with_capacity(vertex_count * 3);
    let mut ring = |y: f32| {
        for i in 0..=s {
            let theta = i as f32 * TAU / s as f32;
            // rotating from z towards x
            vertices.extend_from_slice(&[radius * theta.sin(), y, radius * theta.cos()]);
        }
    };
    ring(height / 2.0);
    ring(-height / 2.0);
    vertices.extend_from_slice(&[0.0, height / 2.0, 0.0]);
    vertices.extend_from_slice(&[0.0, -height / 2.0, 0.0]);

    let top = (2 * s + 2) as u16;
    let bottom = (2 * s + 3) as u16;
    let down = |j: usize| (j + s + 1) as u16;

    let mut indices = Vec::with_capacity(12 * s);
    for j in 0..s {
        let up = j as u16;
        indices.extend_from_slice(&[up, down(j), up + 1]);
        indices.extend_from_slice(&[top, up, up + 1]);
    }
    for j in 0..s {
        let up = j as u16;
        indices.extend_from_slice(&[up + 1, down(j), down(j) + 1]);
        indices.extend_from_slice(&[bottom, down(j), down(j) + 1]);
    }

    Ok(GeometryBuffer::new(3, vertices)?.with_indices(indices))
}

/// Regular polygon laid out for a triangle fan: center, `sides` perimeter
/// points starting at angle 0, then the first perimeter point again.
pub fn regular_polygon(center: [f32; 2], sides: u32, radius: f32) -> GeometryResult<Vec<[f32; 2]>> {
    check_sides("polygon", sides)?;
    check_positive("radius", radius)?;

    let [cx, cy] = center;
    let step = TAU / sides as f32;
    let mut points = Vec::with_capacity(sides as usize + 2);
    points.push(center);
    points.extend((0..sides).map(|i| {
        let a = step * i as f32;
        [cx + a.cos() * radius, cy + a.sin() * radius]
    }));
    points.push([cx + radius, cy]);
    Ok(points)
}

/// Axis-aligned bar of `width × height·ratio` in triangle strip order:
/// lower-left, upper-left, lower-right, upper-right.
///
/// `ratio` shrinks the bar vertically to leave a gap between stacked bars.
pub fn quad(center: [f32; 2], width: f32, height: f32, ratio: f32) -> GeometryResult<[[f32; 2]; 4]> {
    check_positive("width", width)?;
    check_positive("height", height)?;
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(GeometryError::RatioOutOfRange(ratio));
    }

    let [cx, cy] = center;
    let hw = width * 0.5;
    let hh = height * ratio * 0.5;
    Ok([
        [cx - hw, cy - hh],
        [cx - hw, cy + hh],
        [cx + hw, cy - hh],
        [cx + hw, cy + hh],
    ])
}
