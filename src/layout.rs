//! Per-shape bookkeeping for shapes that share one vertex buffer.

use glam::Vec3;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{check_components, GeometryBuffer};

/// One drawable shape inside a shared buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    /// Number of vertices belonging to this shape.
    pub vertex_count: usize,
    /// Index of the shape's first vertex in the shared buffer.
    pub offset: usize,
    /// Pivot for rotation and scale.
    pub center: Vec3,
    /// Per-shape tint, `None` when the draw supplies its own color.
    pub color: Option<[f32; 3]>,
}

impl ShapeDescriptor {
    /// One past the shape's last vertex.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.vertex_count
    }
}

/// Shapes in emission order with their precomputed offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTable {
    components: usize,
    shapes: Vec<ShapeDescriptor>,
}

impl LayoutTable {
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, shape: usize) -> Option<&ShapeDescriptor> {
        self.shapes.get(shape)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShapeDescriptor> {
        self.shapes.iter()
    }

    /// Index of the first vertex of `shape`.
    #[inline]
    pub fn offset_of(&self, shape: usize) -> Option<usize> {
        self.shapes.get(shape).map(|s| s.offset)
    }

    /// Byte offset of `shape` for an attribute pointer over tightly packed `f32`s.
    #[inline]
    pub fn byte_offset_of(&self, shape: usize) -> Option<usize> {
        self.offset_of(shape)
            .map(|offset| offset * self.components * std::mem::size_of::<f32>())
    }

    pub fn total_vertices(&self) -> usize {
        self.shapes.last().map_or(0, ShapeDescriptor::end)
    }
}

impl<'a> IntoIterator for &'a LayoutTable {
    type Item = &'a ShapeDescriptor;
    type IntoIter = std::slice::Iter<'a, ShapeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Appends shapes to one vertex list, recording where each one starts.
#[derive(Debug)]
pub struct LayoutBuilder {
    components: usize,
    vertices: Vec<f32>,
    shapes: Vec<ShapeDescriptor>,
}

impl LayoutBuilder {
    /// Builder for vertices of `components` floats (2 or 3).
    pub fn new(components: usize) -> GeometryResult<Self> {
        check_components(components)?;
        Ok(Self {
            components,
            vertices: Vec::new(),
            shapes: Vec::new(),
        })
    }

    /// Adds one shape; each vertex must have exactly `components` floats.
    pub fn push_shape<V: AsRef<[f32]>>(
        &mut self,
        vertices: &[V],
        center: Vec3,
        color: Option<[f32; 3]>,
    ) -> GeometryResult<&ShapeDescriptor> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if let Some(bad) = vertices.iter().find(|v| v.as_ref().len() != self.components) {
            return Err(GeometryError::ComponentMismatch {
                expected: self.components,
                got: bad.as_ref().len(),
            });
        }

        let offset = self.vertices.len() / self.components;
        for v in vertices {
            self.vertices.extend_from_slice(v.as_ref());
        }
        self.shapes.push(ShapeDescriptor {
            vertex_count: vertices.len(),
            offset,
            center,
            color,
        });
        Ok(&self.shapes[self.shapes.len() - 1])
    }

    pub fn finish(self) -> (GeometryBuffer, LayoutTable) {
        (
            GeometryBuffer::packed(self.components, self.vertices),
            LayoutTable {
                components: self.components,
                shapes: self.shapes,
            },
        )
    }
}
