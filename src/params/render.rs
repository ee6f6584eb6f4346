//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Camera distance from the origin along +Z
    pub camera_distance: f32,

    /// Initial surface tilt about X (degrees)
    /// Negative values tip the far edge away from the camera
    pub surface_tilt_deg: f32,

    /// Material color multiplier (RGBA)
    pub tint: [f32; 4],

    /// Start in wireframe draw mode
    pub start_wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 500.0,
            camera_distance: 40.0,
            surface_tilt_deg: -45.0,
            tint: [1.0, 1.0, 1.0, 1.0],
            start_wireframe: false,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
