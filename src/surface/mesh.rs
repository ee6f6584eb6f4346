//! Vertex format, grid triangulation and the CPU-side mesh buffer.

use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};

/// Vertex data for the surface mesh (position + packed RGBA8 color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: u32,
}

impl Vertex {
    /// Attribute layout: 3-float position at 0, normalized RGBA8 color at 12
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
            ],
        }
    }
}

/// Pack three [0, 1] channels into an opaque RGBA8 word (R in the low byte)
pub fn pack_color(r: f32, g: f32, b: f32) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u32;
    0xff00_0000 | channel(r) | (channel(g) << 8) | (channel(b) << 16)
}

/// Buffer sizes and primitive assembly for an N x N lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshLayout {
    /// Lattice points per side; every other count derives from it
    pub grid_size: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub vertex_stride: usize,
    pub topology: wgpu::PrimitiveTopology,
    pub index_format: wgpu::IndexFormat,
}

impl MeshLayout {
    /// Layout for a lattice with `grid_size` points per side
    pub fn for_grid(grid_size: usize) -> Self {
        let quads_per_side = grid_size.saturating_sub(1);
        Self {
            grid_size,
            vertex_count: grid_size * grid_size,
            index_count: 6 * quads_per_side * quads_per_side,
            vertex_stride: std::mem::size_of::<Vertex>(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    /// Line-list layout covering each distinct triangle edge once.
    ///
    /// Per cell: top and left edges plus the diagonal, then the closing
    /// bottom row and right column.
    pub fn for_grid_edges(grid_size: usize) -> Self {
        let quads_per_side = grid_size.saturating_sub(1);
        let edge_count = 2 * grid_size * quads_per_side + quads_per_side * quads_per_side;
        Self {
            topology: wgpu::PrimitiveTopology::LineList,
            index_count: 2 * edge_count,
            ..Self::for_grid(grid_size)
        }
    }
}

/// Two triangles per grid cell, skipping the right-edge column.
///
/// Returns an empty list for `grid_size < 2`.
pub fn grid_indices(grid_size: usize) -> Vec<u32> {
    let layout = MeshLayout::for_grid(grid_size);
    let mut indices = Vec::with_capacity(layout.index_count);
    if grid_size < 2 {
        return indices;
    }

    let n = grid_size as u32;
    // idx----idx+1
    //  |  \   |
    // idx+N--idx+N+1
    for idx in 0..n * (n - 1) {
        if idx % n == n - 1 {
            continue;
        }
        indices.extend_from_slice(&[idx, idx + n + 1, idx + 1, idx, idx + n, idx + n + 1]);
    }

    indices
}

/// Distinct edges of the [`grid_indices`] triangles as line-list pairs.
///
/// Edges shared by two triangles appear once, in first-seen order.
pub fn grid_edge_indices(grid_size: usize) -> Vec<u32> {
    let triangles = grid_indices(grid_size);
    let mut seen = HashSet::with_capacity(triangles.len());
    let mut edges = Vec::with_capacity(MeshLayout::for_grid_edges(grid_size).index_count);

    for tri in triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if seen.insert((a.min(b), a.max(b))) {
                edges.extend_from_slice(&[a, b]);
            }
        }
    }

    edges
}

/// Pre-sized vertex/index storage handed to the renderer by reference
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    layout: MeshLayout,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Allocate zeroed storage matching `layout`
    pub fn allocate(layout: MeshLayout) -> Self {
        Self {
            layout,
            vertices: vec![Vertex::zeroed(); layout.vertex_count],
            indices: vec![0; layout.index_count],
        }
    }

    pub fn layout(&self) -> &MeshLayout {
        &self.layout
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Write access to vertex storage; sizes are fixed at allocation
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Write access to index storage; sizes are fixed at allocation
    pub fn indices_mut(&mut self) -> &mut [u32] {
        &mut self.indices
    }
}
