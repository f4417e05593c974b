//! Drawing shapes through an abstract GPU target.
//!
//! [`ShapeRenderer`] keeps the buffers uploaded for each shape and only
//! re-creates them when the shape's generation moves on. The target itself
//! (device, queue, pipelines) lives outside this crate behind [`RenderTarget`].

use std::collections::HashMap;

use glam::Mat4;
use vellum_core::constants::TRANSFORM_UNIFORM_SIZE;

use crate::camera::Camera;
use crate::shape::{Shape, ShapeId};

/// Minimal GPU surface needed to draw shape meshes.
pub trait RenderTarget {
    type Buffer;

    fn create_vertex_buffer(&mut self, data: &[f32]) -> Self::Buffer;
    fn create_index_buffer(&mut self, data: &[u16]) -> Self::Buffer;
    fn create_uniform_buffer(&mut self, data: &[u8]) -> Self::Buffer;
    fn write_buffer(&mut self, buffer: &Self::Buffer, offset: u64, data: &[u8]);
    fn draw_indexed(
        &mut self,
        vertices: &Self::Buffer,
        indices: &Self::Buffer,
        uniform: &Self::Buffer,
        index_count: u32,
    );
}

struct MeshBuffers<B> {
    vertices: B,
    indices: B,
    index_count: u32,
}

struct ShapeBuffers<B> {
    generation: u64,
    uniform: B,
    meshes: Vec<MeshBuffers<B>>,
}

/// Per-shape buffer cache.
pub struct ShapeRenderer<T: RenderTarget> {
    cache: HashMap<ShapeId, ShapeBuffers<T::Buffer>>,
    uploads: u64,
}

impl<T: RenderTarget> Default for ShapeRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RenderTarget> ShapeRenderer<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            uploads: 0,
        }
    }

    /// Writes the shape's matrix and submits each of its meshes.
    pub fn draw(&mut self, shape: &Shape, camera: &dyn Camera, target: &mut T) {
        let stale = self
            .cache
            .get(&shape.id())
            .is_none_or(|cached| cached.generation != shape.generation());

        if stale {
            let uniform = match self.cache.remove(&shape.id()) {
                Some(cached) => cached.uniform,
                None => target.create_uniform_buffer(&[0u8; TRANSFORM_UNIFORM_SIZE]),
            };
            let meshes = shape
                .meshes()
                .iter()
                .map(|mesh| MeshBuffers {
                    vertices: target.create_vertex_buffer(mesh.vertices()),
                    indices: target.create_index_buffer(mesh.indices()),
                    index_count: mesh.index_count() as u32,
                })
                .collect();
            self.cache.insert(
                shape.id(),
                ShapeBuffers {
                    generation: shape.generation(),
                    uniform,
                    meshes,
                },
            );
            self.uploads += 1;
            tracing::trace!(shape = %shape.id(), generation = shape.generation(), "Uploaded shape buffers");
        }

        let Some(buffers) = self.cache.get(&shape.id()) else {
            return;
        };

        let mvp: Mat4 = camera.view_projection_matrix() * shape.transform().model_matrix().as_mat4();
        target.write_buffer(&buffers.uniform, 0, bytemuck::cast_slice(&mvp.to_cols_array()));

        for mesh in &buffers.meshes {
            target.draw_indexed(&mesh.vertices, &mesh.indices, &buffers.uniform, mesh.index_count);
        }
    }

    /// Drops the buffers cached for `id`.
    pub fn evict(&mut self, id: ShapeId) -> bool {
        self.cache.remove(&id).is_some()
    }

    /// Keeps only the shapes for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(ShapeId) -> bool) {
        self.cache.retain(|id, _| keep(*id));
    }

    pub fn is_cached(&self, id: ShapeId) -> bool {
        self.cache.contains_key(&id)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of times any shape's buffers were (re)created.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Index,
    Uniform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(usize);

#[derive(Debug, Clone)]
pub struct RecordedBuffer {
    pub kind: BufferKind,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub vertices: BufferHandle,
    pub indices: BufferHandle,
    pub uniform: BufferHandle,
    pub index_count: u32,
}

/// In-memory target that records buffers and draw calls.
///
/// Zero-length draws are counted but not recorded.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    buffers: Vec<RecordedBuffer>,
    draws: Vec<DrawCall>,
    empty_draws: usize,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> &[RecordedBuffer] {
        &self.buffers
    }

    pub fn buffer(&self, handle: BufferHandle) -> Option<&RecordedBuffer> {
        self.buffers.get(handle.0)
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn empty_draws(&self) -> usize {
        self.empty_draws
    }

    pub fn triangle_count(&self) -> usize {
        self.draws.iter().map(|d| d.index_count as usize / 3).sum()
    }

    /// Matrix last written to a uniform buffer.
    pub fn uniform_matrix(&self, handle: BufferHandle) -> Option<Mat4> {
        let data = &self.buffer(handle)?.data;
        if data.len() < TRANSFORM_UNIFORM_SIZE {
            return None;
        }
        let cols: [f32; 16] = bytemuck::pod_read_unaligned(&data[..TRANSFORM_UNIFORM_SIZE]);
        Some(Mat4::from_cols_array(&cols))
    }

    /// Forgets draw calls, keeping buffers.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
        self.empty_draws = 0;
    }

    fn push(&mut self, kind: BufferKind, data: &[u8]) -> BufferHandle {
        self.buffers.push(RecordedBuffer {
            kind,
            data: data.to_vec(),
        });
        BufferHandle(self.buffers.len() - 1)
    }
}

impl RenderTarget for RecordingTarget {
    type Buffer = BufferHandle;

    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferHandle {
        self.push(BufferKind::Vertex, bytemuck::cast_slice(data))
    }

    fn create_index_buffer(&mut self, data: &[u16]) -> BufferHandle {
        self.push(BufferKind::Index, bytemuck::cast_slice(data))
    }

    fn create_uniform_buffer(&mut self, data: &[u8]) -> BufferHandle {
        self.push(BufferKind::Uniform, data)
    }

    fn write_buffer(&mut self, buffer: &BufferHandle, offset: u64, data: &[u8]) {
        let Some(target) = self.buffers.get_mut(buffer.0) else {
            tracing::warn!(buffer = buffer.0, "Write to unknown buffer");
            return;
        };
        let start = offset as usize;
        let end = start + data.len();
        if target.data.len() < end {
            target.data.resize(end, 0);
        }
        target.data[start..end].copy_from_slice(data);
    }

    fn draw_indexed(
        &mut self,
        vertices: &BufferHandle,
        indices: &BufferHandle,
        uniform: &BufferHandle,
        index_count: u32,
    ) {
        if index_count == 0 {
            self.empty_draws += 1;
            return;
        }
        self.draws.push(DrawCall {
            vertices: *vertices,
            indices: *indices,
            uniform: *uniform,
            index_count,
        });
    }
}
