//! Renderable triangle meshes built from ring groups.

use crate::model::Point;
use crate::triangulate::{decimate, pad_indices, triangulate_with_holes, RingGroup};

/// Vertex and index data for one ring group.
///
/// `indices` is padded with zeros to the configured alignment; only the first
/// `index_count` entries are real and only those are drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    indices: Vec<u16>,
    index_count: usize,
    complete: bool,
}

impl Mesh {
    /// Flattens and triangulates a ring group.
    ///
    /// Rings longer than `max_vertices` are decimated first and the decimated
    /// points become the vertex buffer. Degenerate groups still carry their
    /// vertices, with no indices.
    pub fn from_group(group: &RingGroup, max_vertices: usize, index_alignment: usize) -> Self {
        let group = RingGroup {
            outer: decimate(&group.outer, max_vertices),
            holes: group
                .holes
                .iter()
                .map(|h| decimate(h, max_vertices))
                .collect(),
        };

        let triangulation = triangulate_with_holes(&group.outer, &group.holes);
        let vertices: Vec<f32> = group
            .vertices()
            .flat_map(|p| [p.x as f32, p.y as f32])
            .collect();
        let index_count = triangulation.indices.len();

        Self {
            vertices,
            indices: pad_indices(triangulation.indices, index_alignment),
            index_count,
            complete: triangulation.complete,
        }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Padded index buffer.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Real index count, excluding padding.
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn triangle_count(&self) -> usize {
        self.index_count / 3
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        let xy = self.vertices.get(index * 2..index * 2 + 2)?;
        Some(Point::new(xy[0] as f64, xy[1] as f64))
    }

    /// Sum of the areas of the real triangles.
    pub fn area(&self) -> f64 {
        self.indices[..self.index_count]
            .chunks_exact(3)
            .filter_map(|t| {
                let a = self.point(t[0] as usize)?;
                let b = self.point(t[1] as usize)?;
                let c = self.point(t[2] as usize)?;
                Some(((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs() / 2.0)
            })
            .sum()
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
