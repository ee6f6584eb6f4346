//! Wave spectrum generation parameters and live-tuning step sizes.

use std::f32::consts::TAU;

/// Parameters for the default multi-octave wave spectrum
#[derive(Debug, Clone)]
pub struct WaveSpectrum {
    /// Number of traveling waves summed into the field (K)
    pub wave_count: usize,

    /// Amplitude scale (world units); wave i gets `base_amplitude * falloff^i`
    pub base_amplitude: f32,

    /// Spatial rate (cycles per unit length); frequency = 2π * rate * growth^i
    pub base_rate: f32,

    /// Shared phase-speed constant; omega = phase_speed * frequency
    pub phase_speed: f32,

    /// Global Gerstner steepness in [0, 1]
    /// 0 = pure sine displacement, 1 = maximum horizontal crowding
    pub steepness: f32,

    /// Per-octave amplitude multiplier
    pub amplitude_falloff: f32,

    /// Per-octave frequency multiplier
    pub frequency_growth: f32,

    /// Normalize the random directions drawn from [-1, 1]^2.
    /// Off by default: raw directions scale each wave's phase rate by |d|.
    pub normalize_directions: bool,

    /// RNG seed for wave directions (None = derived from the wall clock by the caller)
    pub seed: Option<u64>,
}

impl Default for WaveSpectrum {
    fn default() -> Self {
        Self {
            wave_count: 4,
            base_amplitude: 1.0,
            base_rate: 0.01,
            phase_speed: 3.0,
            steepness: 0.5,
            amplitude_falloff: 0.5,
            frequency_growth: 1.25,
            normalize_directions: false,
            seed: None,
        }
    }
}

impl WaveSpectrum {
    /// Angular spatial frequency of the first octave (before growth)
    pub fn base_frequency(&self) -> f32 {
        TAU * self.base_rate
    }

    /// Validate spectrum parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.wave_count == 0 {
            return Err("Wave count must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.steepness) {
            return Err(format!(
                "Steepness must be within [0, 1], got {}",
                self.steepness
            ));
        }
        for (name, value) in [
            ("base_amplitude", self.base_amplitude),
            ("base_rate", self.base_rate),
            ("phase_speed", self.phase_speed),
            ("amplitude_falloff", self.amplitude_falloff),
            ("frequency_growth", self.frequency_growth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be finite and > 0, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Bounds applied by live parameter adjustment
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AdjustPolicy {
    /// Values may go negative (matches the interactive tool's behavior)
    #[default]
    Unclamped,

    /// Amplitude and frequency never drop below the given floors
    Clamped {
        min_amplitude: f32,
        min_frequency: f32,
    },
}

/// Fixed step sizes for the key-triggered wave controls
#[derive(Debug, Clone)]
pub struct AdjustSteps {
    /// Amplitude delta per key press (world units)
    pub amplitude_step: f32,

    /// Angular frequency delta per key press (radians per unit length)
    pub frequency_step: f32,

    /// Direction rotation per key press (degrees, about +Z)
    pub direction_step_deg: f32,

    pub policy: AdjustPolicy,
}

impl Default for AdjustSteps {
    fn default() -> Self {
        Self {
            amplitude_step: 0.1,
            frequency_step: TAU * 0.001,
            direction_step_deg: 5.0,
            policy: AdjustPolicy::Unclamped,
        }
    }
}
