//! Live tuning of the leading wave.

use glam::Vec2;

use super::WaveField;
use crate::params::{AdjustPolicy, AdjustSteps};

/// Discrete parameter tweak applied to the first wave of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveAdjustment {
    IncreaseAmplitude,
    DecreaseAmplitude,
    IncreaseFrequency,
    DecreaseFrequency,
    /// Counter-clockwise about +Z
    RotateDirection,
    /// Clockwise about +Z
    RotateDirectionReverse,
}

impl WaveField {
    /// Apply `op` to wave 0 with fixed step sizes.
    ///
    /// Frequency changes re-derive omega from the shared phase speed.
    /// Returns false when the field has no waves.
    pub fn adjust(&mut self, op: WaveAdjustment, steps: &AdjustSteps) -> bool {
        let phase_speed = self.phase_speed;
        let Some(wave) = self.waves.first_mut() else {
            return false;
        };

        match op {
            WaveAdjustment::IncreaseAmplitude => {
                wave.amplitude = bound_amplitude(wave.amplitude + steps.amplitude_step, steps.policy);
            }
            WaveAdjustment::DecreaseAmplitude => {
                wave.amplitude = bound_amplitude(wave.amplitude - steps.amplitude_step, steps.policy);
            }
            WaveAdjustment::IncreaseFrequency => {
                wave.frequency = bound_frequency(wave.frequency + steps.frequency_step, steps.policy);
                wave.omega = phase_speed * wave.frequency;
            }
            WaveAdjustment::DecreaseFrequency => {
                wave.frequency = bound_frequency(wave.frequency - steps.frequency_step, steps.policy);
                wave.omega = phase_speed * wave.frequency;
            }
            WaveAdjustment::RotateDirection => {
                let rotation = Vec2::from_angle(steps.direction_step_deg.to_radians());
                wave.direction = rotation.rotate(wave.direction);
            }
            WaveAdjustment::RotateDirectionReverse => {
                let rotation = Vec2::from_angle(-steps.direction_step_deg.to_radians());
                wave.direction = rotation.rotate(wave.direction);
            }
        }

        log::debug!(
            "{:?}: amplitude {:.3}, frequency {:.4}, direction ({:.3}, {:.3})",
            op,
            wave.amplitude,
            wave.frequency,
            wave.direction.x,
            wave.direction.y
        );
        true
    }
}

fn bound_amplitude(value: f32, policy: AdjustPolicy) -> f32 {
    match policy {
        AdjustPolicy::Unclamped => value,
        AdjustPolicy::Clamped { min_amplitude, .. } => value.max(min_amplitude),
    }
}

fn bound_frequency(value: f32, policy: AdjustPolicy) -> f32 {
    match policy {
        AdjustPolicy::Unclamped => value,
        AdjustPolicy::Clamped { min_frequency, .. } => value.max(min_frequency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::TravelingWave;

    fn two_wave_field() -> WaveField {
        WaveField::new(
            vec![
                TravelingWave::new(0.5, Vec2::new(1.0, 0.0), 0.1, 3.0),
                TravelingWave::new(0.25, Vec2::new(0.0, 1.0), 0.2, 3.0),
            ],
            0.5,
            3.0,
        )
    }

    #[test]
    fn test_only_first_wave_changes() {
        let mut field = two_wave_field();
        let second = field.waves[1];
        let steps = AdjustSteps::default();

        for op in [
            WaveAdjustment::IncreaseAmplitude,
            WaveAdjustment::IncreaseFrequency,
            WaveAdjustment::RotateDirection,
        ] {
            assert!(field.adjust(op, &steps));
        }

        assert_eq!(field.waves[1], second);
        assert!((field.waves[0].amplitude - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_frequency_keeps_phase_speed() {
        let mut field = two_wave_field();
        let steps = AdjustSteps::default();

        field.adjust(WaveAdjustment::DecreaseFrequency, &steps);
        let wave = field.waves[0];
        assert!((wave.frequency - (0.1 - steps.frequency_step)).abs() < 1e-6);
        assert!((wave.omega - 3.0 * wave.frequency).abs() < 1e-6);
    }

    #[test]
    fn test_unclamped_amplitude_goes_negative() {
        let mut field = two_wave_field();
        let steps = AdjustSteps::default();

        for _ in 0..10 {
            field.adjust(WaveAdjustment::DecreaseAmplitude, &steps);
        }
        assert!(field.waves[0].amplitude < 0.0);
    }

    #[test]
    fn test_clamped_policy_holds_floor() {
        let mut field = two_wave_field();
        let steps = AdjustSteps {
            policy: AdjustPolicy::Clamped {
                min_amplitude: 0.0,
                min_frequency: 0.05,
            },
            ..Default::default()
        };

        for _ in 0..100 {
            field.adjust(WaveAdjustment::DecreaseAmplitude, &steps);
            field.adjust(WaveAdjustment::DecreaseFrequency, &steps);
        }
        assert_eq!(field.waves[0].amplitude, 0.0);
        assert_eq!(field.waves[0].frequency, 0.05);
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut field = two_wave_field();
        let original = field.waves[0].direction;
        let steps = AdjustSteps::default();

        field.adjust(WaveAdjustment::RotateDirection, &steps);
        assert!((field.waves[0].direction - original).length() > 1e-4);
        // Rotation preserves length
        assert!((field.waves[0].direction.length() - original.length()).abs() < 1e-5);

        field.adjust(WaveAdjustment::RotateDirectionReverse, &steps);
        assert!((field.waves[0].direction - original).length() < 1e-5);
    }

    #[test]
    fn test_empty_field_ignores_adjustment() {
        let mut field = WaveField::new(Vec::new(), 0.5, 3.0);
        assert!(!field.adjust(WaveAdjustment::IncreaseAmplitude, &AdjustSteps::default()));
    }
}
