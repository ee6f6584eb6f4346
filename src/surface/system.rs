//! High-level surface system: validated setup, per-frame stepping and
//! live controls.

use super::builder::SurfaceBuilder;
use crate::controls::Control;
use crate::params::{AdjustSteps, SurfaceLayout, WaveSpectrum};
use crate::wave::WaveField;

/// Wave surface with its live-control step sizes
pub struct SurfaceSystem {
    pub builder: SurfaceBuilder,
    steps: AdjustSteps,
    seed: u64,
}

impl SurfaceSystem {
    /// Validate parameters and build the surface at rest.
    ///
    /// `seed` drives wave directions; the vertex tint uses a derived stream.
    pub fn new(
        spectrum: &WaveSpectrum,
        layout: SurfaceLayout,
        steps: AdjustSteps,
        seed: u64,
    ) -> Result<Self, String> {
        spectrum
            .validate()
            .map_err(|e| format!("Invalid wave spectrum: {}", e))?;
        layout
            .validate()
            .map_err(|e| format!("Invalid surface layout: {}", e))?;

        let field = WaveField::from_spectrum(spectrum, seed);
        let mut builder = SurfaceBuilder::new(layout, field, seed.wrapping_add(1));
        builder.rebuild_render_buffers();

        Ok(Self {
            builder,
            steps,
            seed,
        })
    }

    /// One simulation tick followed by a vertex refresh
    pub fn step(&mut self) {
        self.builder.advance_simulation();
        self.builder.rebuild_render_buffers();
    }

    /// Apply a key-triggered control; returns false when the app should quit
    pub fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::Adjust(op) => {
                self.builder.adjust(op, &self.steps);
            }
            Control::ToggleWireframe => {
                let mode = self.builder.toggle_wireframe();
                log::info!("Draw mode: {:?}", mode);
            }
            Control::Quit => return false,
        }
        true
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
