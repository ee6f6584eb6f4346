//! Key bindings for the live wave controls.

use winit::keyboard::KeyCode;

use crate::wave::WaveAdjustment;

/// Action triggered by a single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Adjust(WaveAdjustment),
    ToggleWireframe,
    Quit,
}

/// Key map: N/M amplitude, O/P frequency, K/L direction, W wireframe, Esc quit
pub fn control_for_key(key: KeyCode) -> Option<Control> {
    let control = match key {
        KeyCode::KeyN => Control::Adjust(WaveAdjustment::IncreaseAmplitude),
        KeyCode::KeyM => Control::Adjust(WaveAdjustment::DecreaseAmplitude),
        KeyCode::KeyO => Control::Adjust(WaveAdjustment::IncreaseFrequency),
        KeyCode::KeyP => Control::Adjust(WaveAdjustment::DecreaseFrequency),
        KeyCode::KeyK => Control::Adjust(WaveAdjustment::RotateDirection),
        KeyCode::KeyL => Control::Adjust(WaveAdjustment::RotateDirectionReverse),
        KeyCode::KeyW => Control::ToggleWireframe,
        KeyCode::Escape => Control::Quit,
        _ => return None,
    };
    Some(control)
}

/// Help text printed at startup
pub const KEY_HELP: &str = "\
  N / M   wave amplitude up / down
  O / P   wave frequency up / down
  K / L   rotate wave direction
  W       toggle wireframe
  Esc     quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_map() {
        assert_eq!(
            control_for_key(KeyCode::KeyO),
            Some(Control::Adjust(WaveAdjustment::IncreaseFrequency))
        );
        assert_eq!(
            control_for_key(KeyCode::KeyL),
            Some(Control::Adjust(WaveAdjustment::RotateDirectionReverse))
        );
        assert_eq!(control_for_key(KeyCode::KeyW), Some(Control::ToggleWireframe));
        assert_eq!(control_for_key(KeyCode::Escape), Some(Control::Quit));
        assert_eq!(control_for_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_every_adjustment_is_bound() {
        let bound: Vec<Control> = [
            KeyCode::KeyN,
            KeyCode::KeyM,
            KeyCode::KeyO,
            KeyCode::KeyP,
            KeyCode::KeyK,
            KeyCode::KeyL,
        ]
        .into_iter()
        .filter_map(control_for_key)
        .collect();

        for op in [
            WaveAdjustment::IncreaseAmplitude,
            WaveAdjustment::DecreaseAmplitude,
            WaveAdjustment::IncreaseFrequency,
            WaveAdjustment::DecreaseFrequency,
            WaveAdjustment::RotateDirection,
            WaveAdjustment::RotateDirectionReverse,
        ] {
            assert!(bound.contains(&Control::Adjust(op)));
        }
    }
}
