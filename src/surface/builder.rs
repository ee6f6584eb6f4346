//! Surface mesh builder: owns the lattice, drives the wave field and
//! materializes the lattice into renderer-ready buffers.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::mesh::{grid_indices, pack_color, MeshLayout, SurfaceMesh, Vertex};
use super::node::SceneNode;
use crate::params::{AdjustSteps, ColorPolicy, SurfaceLayout};
use crate::wave::{WaveAdjustment, WaveField};

/// Primitive assembly used when drawing the (unchanged) index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Filled,
    Wireframe,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Filled => Self::Wireframe,
            Self::Wireframe => Self::Filled,
        }
    }
}

/// Fixed N x N lattice animated by a Gerstner wave field
pub struct SurfaceBuilder {
    layout: SurfaceLayout,
    field: WaveField,
    rest_positions: Vec<Vec3>,
    positions: Vec<Vec3>,
    mesh: SurfaceMesh,
    draw_mode: DrawMode,
    node: SceneNode,
    color_rng: StdRng,
}

impl SurfaceBuilder {
    /// Create a builder at rest. The triangulation is written once here.
    pub fn new(layout: SurfaceLayout, field: WaveField, color_seed: u64) -> Self {
        let n = layout.grid_size;

        let rest_positions: Vec<Vec3> = {
            let layout = &layout;
            (0..n)
                .flat_map(|i| (0..n).map(move |j| layout.rest_position(i, j)))
                .collect()
        };

        let mut mesh = SurfaceMesh::allocate(MeshLayout::for_grid(n));
        mesh.indices_mut().copy_from_slice(&grid_indices(n));

        log::debug!(
            "Surface lattice {}x{}: {} vertices, {} indices, {} waves",
            n,
            n,
            mesh.layout().vertex_count,
            mesh.layout().index_count,
            field.waves.len()
        );

        Self {
            positions: rest_positions.clone(),
            rest_positions,
            layout,
            field,
            mesh,
            draw_mode: DrawMode::default(),
            node: SceneNode::default(),
            color_rng: StdRng::seed_from_u64(color_seed),
        }
    }

    /// Displace every lattice point by the current wave field, then tick time.
    ///
    /// Cell (i, j) samples the field at x = j (column), y = i (row).
    pub fn advance_simulation(&mut self) {
        displace_points(
            &self.field,
            self.layout.grid_size,
            &self.rest_positions,
            &mut self.positions,
        );
        self.field.advance();
    }

    /// Refresh the vertex buffer from the current lattice.
    ///
    /// Indices never change for a fixed N and were written at construction.
    pub fn rebuild_render_buffers(&mut self) {
        let n = self.layout.grid_size;
        let policy = self.layout.color_policy;
        let rng = &mut self.color_rng;

        for (idx, (vertex, position)) in self
            .mesh
            .vertices_mut()
            .iter_mut()
            .zip(&self.positions)
            .enumerate()
        {
            let color = match policy {
                ColorPolicy::GridGradient => {
                    let (i, j) = (idx / n, idx % n);
                    pack_color(j as f32 / n as f32, i as f32 / n as f32, 0.0)
                }
                ColorPolicy::RandomTint => random_tint(rng),
            };

            *vertex = Vertex {
                position: position.to_array(),
                color,
            };
        }
    }

    /// Flip between filled and wireframe drawing; returns the new mode
    pub fn toggle_wireframe(&mut self) -> DrawMode {
        self.draw_mode = self.draw_mode.toggled();
        log::debug!("Draw mode: {:?}", self.draw_mode);
        self.draw_mode
    }

    /// Tune the leading wave (see [`WaveField::adjust`])
    pub fn adjust(&mut self, op: WaveAdjustment, steps: &AdjustSteps) -> bool {
        self.field.adjust(op, steps)
    }

    pub fn grid_size(&self) -> usize {
        self.layout.grid_size
    }

    /// Ticks advanced so far
    pub fn time(&self) -> u64 {
        self.field.time()
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Current displaced positions, row-major
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    pub fn node(&self) -> &SceneNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut SceneNode {
        &mut self.node
    }

    /// Vertical extent (min z, max z) of the current lattice
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.positions.iter().fold(None, |range, p| match range {
            None => Some((p.z, p.z)),
            Some((lo, hi)) => Some((lo.min(p.z), hi.max(p.z))),
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn displace_points(field: &WaveField, n: usize, rest: &[Vec3], positions: &mut [Vec3]) {
    for (idx, (position, rest)) in positions.iter_mut().zip(rest).enumerate() {
        let (i, j) = (idx / n, idx % n);
        *position = *rest + field.displacement(j as i32, i as i32);
    }
}

#[cfg(feature = "parallel")]
fn displace_points(field: &WaveField, n: usize, rest: &[Vec3], positions: &mut [Vec3]) {
    use rayon::prelude::*;

    // Each cell reads only the shared field and writes its own slot
    positions
        .par_iter_mut()
        .zip(rest.par_iter())
        .enumerate()
        .for_each(|(idx, (position, rest))| {
            let (i, j) = (idx / n, idx % n);
            *position = *rest + field.displacement(j as i32, i as i32);
        });
}

/// Randomized blue-green tint
fn random_tint(rng: &mut StdRng) -> u32 {
    let r = rng.gen_range(0.0..0.15);
    let g = rng.gen_range(0.35..0.75);
    let b = rng.gen_range(0.6..1.0);
    pack_color(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::{initialize_default_waves, TravelingWave};
    use glam::Vec2;
    use std::f32::consts::TAU;

    fn builder(grid_size: usize, color_policy: ColorPolicy) -> SurfaceBuilder {
        let layout = SurfaceLayout {
            grid_size,
            color_policy,
            ..Default::default()
        };
        SurfaceBuilder::new(layout, initialize_default_waves(4, 21), 5)
    }

    #[test]
    fn test_buffer_sizes() {
        for (n, vertices, indices) in [(2, 4, 6), (4, 16, 54), (8, 64, 294)] {
            let mut surface = builder(n, ColorPolicy::GridGradient);
            surface.advance_simulation();
            surface.rebuild_render_buffers();

            assert_eq!(surface.mesh().vertices().len(), vertices);
            assert_eq!(surface.mesh().indices().len(), indices);
            assert!(surface
                .mesh()
                .indices()
                .iter()
                .all(|&idx| (idx as usize) < n * n));
        }
    }

    #[test]
    fn test_degenerate_grid_does_not_fail() {
        for n in [0, 1] {
            let mut surface = builder(n, ColorPolicy::RandomTint);
            surface.advance_simulation();
            surface.rebuild_render_buffers();
            assert!(surface.mesh().indices().is_empty());
            assert_eq!(surface.mesh().vertices().len(), n * n);
        }
    }

    #[test]
    fn test_time_counts_advances() {
        let mut surface = builder(4, ColorPolicy::RandomTint);
        assert_eq!(surface.time(), 0);
        for _ in 0..37 {
            surface.advance_simulation();
        }
        assert_eq!(surface.time(), 37);
    }

    #[test]
    fn test_positions_are_rest_plus_displacement() {
        let mut surface = builder(6, ColorPolicy::RandomTint);
        for _ in 0..3 {
            surface.advance_simulation();
        }

        // The last advance sampled the field at tick 2
        let field = surface.field().clone().at_time(2);
        let n = surface.grid_size();
        for i in 0..n {
            for j in 0..n {
                let idx = i * n + j;
                let expected =
                    surface.rest_positions[idx] + field.displacement(j as i32, i as i32);
                assert_eq!(surface.positions()[idx], expected);
            }
        }
    }

    #[test]
    fn test_column_major_sampling() {
        // A wave along +X only varies across columns
        let wave = TravelingWave::new(1.0, Vec2::X, TAU * 0.05, 3.0);
        let field = WaveField::new(vec![wave], 0.0, 3.0);
        let layout = SurfaceLayout {
            grid_size: 5,
            ..Default::default()
        };
        let mut surface = SurfaceBuilder::new(layout.clone(), field, 0);
        surface.advance_simulation();

        let lift = |i: usize, j: usize| {
            surface.positions()[i * 5 + j].z - layout.rest_position(i, j).z
        };
        for i in 1..5 {
            assert_eq!(lift(i, 3), lift(0, 3));
        }
        assert_ne!(lift(0, 1), lift(0, 2));
    }

    #[test]
    fn test_rebuild_keeps_topology() {
        let mut surface = builder(5, ColorPolicy::RandomTint);
        let before = surface.mesh().indices().to_vec();

        for _ in 0..4 {
            surface.advance_simulation();
            surface.rebuild_render_buffers();
        }
        assert_eq!(surface.mesh().indices(), before.as_slice());
    }

    #[test]
    fn test_vertices_follow_positions() {
        let mut surface = builder(4, ColorPolicy::RandomTint);
        surface.advance_simulation();
        surface.rebuild_render_buffers();

        for (vertex, position) in surface.mesh().vertices().iter().zip(surface.positions()) {
            assert_eq!(vertex.position, position.to_array());
        }
    }

    #[test]
    fn test_gradient_colors() {
        let mut surface = builder(4, ColorPolicy::GridGradient);
        surface.rebuild_render_buffers();

        let vertices = surface.mesh().vertices();
        assert_eq!(vertices[0].color, pack_color(0.0, 0.0, 0.0));
        // Row 1, column 2
        assert_eq!(vertices[6].color, pack_color(0.5, 0.25, 0.0));
    }

    #[test]
    fn test_random_tint_is_blue_green() {
        let mut surface = builder(6, ColorPolicy::RandomTint);
        surface.rebuild_render_buffers();

        for vertex in surface.mesh().vertices() {
            let [r, g, b, a] = vertex.color.to_le_bytes();
            assert_eq!(a, 255);
            assert!(r < g && g < 255 && b >= 150);
        }
    }

    #[test]
    fn test_random_tint_seeded() {
        let mut a = builder(4, ColorPolicy::RandomTint);
        let mut b = builder(4, ColorPolicy::RandomTint);
        a.rebuild_render_buffers();
        b.rebuild_render_buffers();
        assert_eq!(a.mesh().vertices(), b.mesh().vertices());

        // Colors are redrawn on every rebuild
        let first = a.mesh().vertices().to_vec();
        a.rebuild_render_buffers();
        assert_ne!(a.mesh().vertices(), first.as_slice());
    }

    #[test]
    fn test_wireframe_toggle() {
        let mut surface = builder(3, ColorPolicy::RandomTint);
        assert_eq!(surface.draw_mode(), DrawMode::Filled);
        assert_eq!(surface.toggle_wireframe(), DrawMode::Wireframe);
        assert_eq!(surface.toggle_wireframe(), DrawMode::Filled);
    }

    #[test]
    fn test_adjust_reaches_field() {
        let mut surface = builder(3, ColorPolicy::RandomTint);
        let before = surface.field().waves[0].amplitude;
        assert!(surface.adjust(WaveAdjustment::IncreaseAmplitude, &AdjustSteps::default()));
        assert!(surface.field().waves[0].amplitude > before);
    }

    #[test]
    fn test_height_range() {
        let mut surface = builder(8, ColorPolicy::RandomTint);
        assert_eq!(surface.height_range(), Some((-1.0, -1.0)));

        surface.advance_simulation();
        surface.advance_simulation();
        let (lo, hi) = surface.height_range().unwrap();
        assert!(lo <= hi);
        assert!(builder(0, ColorPolicy::RandomTint).height_range().is_none());
    }
}
