//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, radians, degrees)
//! - Documented ranges and meanings
//! - Validation where a bad value would poison the simulation

mod render;
mod surface;
mod wave;

// Re-export all types
pub use render::RenderConfig;
pub use surface::{ColorPolicy, SurfaceLayout};
pub use wave::{AdjustPolicy, AdjustSteps, WaveSpectrum};
