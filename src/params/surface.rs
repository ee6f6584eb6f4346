//! Surface lattice layout and vertex coloring.

use glam::Vec3;

/// Per-vertex color source, fixed for the lifetime of a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// Randomized blue-green tint, redrawn on every rebuild
    #[default]
    RandomTint,

    /// Normalized grid coordinates: (j / N, i / N, 0)
    GridGradient,
}

/// Lattice resolution and placement
#[derive(Debug, Clone)]
pub struct SurfaceLayout {
    /// Points per side (N); the lattice holds N * N points
    pub grid_size: usize,

    /// Distance between neighboring rest positions (world units)
    pub spacing: f32,

    /// Z coordinate of the rest plane
    pub depth: f32,

    pub color_policy: ColorPolicy,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            grid_size: 32,
            spacing: 1.0,
            depth: -1.0,
            color_policy: ColorPolicy::RandomTint,
        }
    }
}

impl SurfaceLayout {
    /// Rest position of cell (0, 0); the lattice is centered on the origin in XY
    pub fn start_pos(&self) -> Vec3 {
        let half_extent = self.spacing * 0.5 * self.grid_size as f32;
        Vec3::new(-half_extent, half_extent, self.depth)
    }

    /// Rest position of row `i`, column `j` (rows run toward -Y)
    pub fn rest_position(&self, i: usize, j: usize) -> Vec3 {
        self.start_pos() + Vec3::new(self.spacing * j as f32, -self.spacing * i as f32, 0.0)
    }

    /// Validate layout (grid sizes below 2 are allowed and yield no triangles)
    pub fn validate(&self) -> Result<(), String> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(format!(
                "Grid spacing must be finite and > 0, got {}",
                self.spacing
            ));
        }
        if !self.depth.is_finite() {
            return Err(format!("Depth must be finite, got {}", self.depth));
        }
        // Indices are u32
        if self.grid_size.saturating_mul(self.grid_size) > u32::MAX as usize {
            return Err(format!("Grid size {} overflows u32 indices", self.grid_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_positions_centered() {
        let layout = SurfaceLayout {
            grid_size: 16,
            ..Default::default()
        };

        assert_eq!(layout.start_pos(), Vec3::new(-8.0, 8.0, -1.0));
        assert_eq!(layout.rest_position(0, 1), Vec3::new(-7.0, 8.0, -1.0));
        assert_eq!(layout.rest_position(2, 0), Vec3::new(-8.0, 6.0, -1.0));
    }

    #[test]
    fn test_color_policy_defaults_to_tint() {
        assert_eq!(ColorPolicy::default(), ColorPolicy::RandomTint);
        assert_eq!(SurfaceLayout::default().color_policy, ColorPolicy::default());
    }

    #[test]
    fn test_layout_validation() {
        assert!(SurfaceLayout::default().validate().is_ok());

        let bad = SurfaceLayout {
            spacing: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let tiny = SurfaceLayout {
            grid_size: 1,
            ..Default::default()
        };
        assert!(tiny.validate().is_ok());
    }
}
