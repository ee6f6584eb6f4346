//! Gerstner wave field: traveling-wave records and their superposition.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::WaveSpectrum;

/// One summand of the wave field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelingWave {
    /// Vertical displacement magnitude
    pub amplitude: f32,
    /// Propagation direction in the XY plane (not necessarily unit length)
    pub direction: Vec2,
    /// Spatial angular frequency (radians per unit length)
    pub frequency: f32,
    /// Temporal angular frequency (phase speed * frequency)
    pub omega: f32,
}

impl TravelingWave {
    pub fn new(amplitude: f32, direction: Vec2, frequency: f32, phase_speed: f32) -> Self {
        Self {
            amplitude,
            direction,
            frequency,
            omega: phase_speed * frequency,
        }
    }

    /// Phase at lattice coordinate (x, y) after `time` ticks.
    ///
    /// Computed as `omega * (d · p + t * omega)`, which differs from the
    /// textbook Gerstner phase `k · p + omega * t`. Kept for visual parity.
    pub fn phase(&self, x: f32, y: f32, time: f32) -> f32 {
        self.omega * (self.direction.dot(Vec2::new(x, y)) + time * self.omega)
    }
}

/// Ordered set of traveling waves plus the shared steepness and tick counter
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    pub waves: Vec<TravelingWave>,
    /// Global Gerstner steepness, split across waves
    pub steepness: f32,
    /// Shared constant relating omega to frequency
    pub phase_speed: f32,
    time: u64,
}

impl WaveField {
    /// Create a field at time zero
    pub fn new(waves: Vec<TravelingWave>, steepness: f32, phase_speed: f32) -> Self {
        Self {
            waves,
            steepness,
            phase_speed,
            time: 0,
        }
    }

    /// Generate the default multi-octave spectrum.
    ///
    /// Wave `i` (1-indexed) gets amplitude `base * falloff^i` and frequency
    /// `2π * rate * growth^i`; only the directions are random, drawn
    /// uniformly from [-1, 1]^2 with the given seed.
    pub fn from_spectrum(spectrum: &WaveSpectrum, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let base_frequency = spectrum.base_frequency();

        let waves: Vec<TravelingWave> = (1..=spectrum.wave_count)
            .map(|i| {
                let octave = i as i32;
                let amplitude = spectrum.base_amplitude * spectrum.amplitude_falloff.powi(octave);
                let frequency = base_frequency * spectrum.frequency_growth.powi(octave);

                let mut direction =
                    Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
                if spectrum.normalize_directions {
                    direction = direction.normalize_or_zero();
                }

                TravelingWave::new(amplitude, direction, frequency, spectrum.phase_speed)
            })
            .collect();

        log::debug!(
            "Generated {} waves (seed {}, steepness {})",
            waves.len(),
            seed,
            spectrum.steepness
        );

        Self::new(waves, spectrum.steepness, spectrum.phase_speed)
    }

    /// Same field with the tick counter set to `time`
    pub fn at_time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    /// Current tick count
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Advance the tick counter by one
    pub fn advance(&mut self) {
        self.time += 1;
    }

    /// Gerstner displacement of lattice coordinate (x, y) at the current tick.
    ///
    /// Each wave receives `steepness / (omega * K)` of the horizontal budget,
    /// so faster waves crowd less. Pure: no state is read besides `self`.
    pub fn displacement(&self, x: i32, y: i32) -> Vec3 {
        let wave_count = self.waves.len() as f32;
        let (x, y) = (x as f32, y as f32);
        let time = self.time as f32;

        self.waves.iter().fold(Vec3::ZERO, |acc, wave| {
            let q = self.steepness / (wave.omega * wave_count);
            let phase = wave.phase(x, y, time);
            let (sin, cos) = phase.sin_cos();

            acc + Vec3::new(
                q * wave.direction.x * cos,
                q * wave.direction.y * cos,
                wave.amplitude * sin,
            )
        })
    }
}

/// Free-function form of [`WaveField::displacement`]
pub fn displacement(x: i32, y: i32, field: &WaveField) -> Vec3 {
    field.displacement(x, y)
}

/// Build a default spectrum of `wave_count` waves
pub fn initialize_default_waves(wave_count: usize, seed: u64) -> WaveField {
    let spectrum = WaveSpectrum {
        wave_count,
        ..Default::default()
    };
    WaveField::from_spectrum(&spectrum, seed)
}
