//! Fixed viewing camera for the surface.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Stationary camera on +Z looking at the origin
pub struct CameraSystem {
    eye: Vec3,
    target: Vec3,
}

impl CameraSystem {
    pub fn new(render_config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, render_config.camera_distance),
            target: Vec3::ZERO,
        }
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self, render_config: &RenderConfig) -> Mat4 {
        // Y stays up; the surface tilt comes from its scene node
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_proj_matrix_generation() {
        let render_config = RenderConfig::default();
        let camera = CameraSystem::new(&render_config);
        let view_proj = camera.view_proj(&render_config);

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(view_proj.is_finite());
    }

    #[test]
    fn test_eye_sits_on_z_axis() {
        let render_config = RenderConfig {
            camera_distance: 12.0,
            ..Default::default()
        };
        let camera = CameraSystem::new(&render_config);

        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 12.0));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let render_config = RenderConfig::default();
        let camera = CameraSystem::new(&render_config);
        let clip = camera.view_proj(&render_config) * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
