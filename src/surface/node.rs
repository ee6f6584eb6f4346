//! Scene node holding the surface's static model transform.

use glam::Mat4;

/// Transform node the surface is attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    transform: Mat4,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
        }
    }
}

impl SceneNode {
    /// Rotate about the node's local X axis
    pub fn rotate_x_deg(&mut self, degrees: f32) {
        self.transform *= Mat4::from_rotation_x(degrees.to_radians());
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }
}
