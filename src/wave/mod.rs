//! Wave field generator: Gerstner superposition of traveling waves.

mod adjust;
mod field;

// Re-export public types
pub use adjust::WaveAdjustment;
pub use field::{displacement, initialize_default_waves, TravelingWave, WaveField};

use std::time::{SystemTime, UNIX_EPOCH};

/// Seed derived from the wall clock, for entry points that were not given one
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
