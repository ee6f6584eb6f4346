//! Command-line argument parsing.

use clap::Parser;

use crate::params::{
    AdjustPolicy, AdjustSteps, ColorPolicy, RenderConfig, SurfaceLayout, WaveSpectrum,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavegrid")]
#[command(about = "Gerstner wave surface simulator", long_about = None)]
pub struct Args {
    /// Lattice points per side
    #[arg(long, value_name = "N")]
    pub grid_size: Option<usize>,

    /// Number of superposed waves
    #[arg(long, value_name = "K")]
    pub waves: Option<usize>,

    /// Gerstner steepness in [0, 1]
    #[arg(long, value_name = "Q")]
    pub steepness: Option<f32>,

    /// RNG seed for wave directions and vertex tint (default: wall clock)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Vertex coloring: tint (random blue-green) or gradient (grid coordinates)
    #[arg(long, value_name = "POLICY", default_value = "tint")]
    pub color: String,

    /// Normalize random wave directions to unit length
    #[arg(long)]
    pub normalize_directions: bool,

    /// Keep live-adjusted amplitude and frequency above zero
    #[arg(long)]
    pub clamp: bool,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Run without a window for the given number of frames
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u64>,
}

impl Args {
    /// Parse color policy from command-line arguments
    pub fn parse_color_policy(&self) -> ColorPolicy {
        match self.color.to_lowercase().as_str() {
            "tint" => ColorPolicy::RandomTint,
            "gradient" => ColorPolicy::GridGradient,
            other => {
                log::warn!("Unknown color policy '{}', using tint", other);
                ColorPolicy::RandomTint
            }
        }
    }

    /// Wave spectrum with command-line overrides applied
    pub fn wave_spectrum(&self) -> WaveSpectrum {
        let defaults = WaveSpectrum::default();
        WaveSpectrum {
            wave_count: self.waves.unwrap_or(defaults.wave_count),
            steepness: self.steepness.unwrap_or(defaults.steepness),
            normalize_directions: self.normalize_directions,
            seed: self.seed,
            ..defaults
        }
    }

    /// Lattice layout with command-line overrides applied
    pub fn surface_layout(&self) -> SurfaceLayout {
        let defaults = SurfaceLayout::default();
        SurfaceLayout {
            grid_size: self.grid_size.unwrap_or(defaults.grid_size),
            color_policy: self.parse_color_policy(),
            ..defaults
        }
    }

    /// Live-control steps; `--clamp` enables the bounded policy
    pub fn adjust_steps(&self) -> AdjustSteps {
        let policy = if self.clamp {
            AdjustPolicy::Clamped {
                min_amplitude: 0.0,
                min_frequency: AdjustSteps::default().frequency_step,
            }
        } else {
            AdjustPolicy::Unclamped
        };

        AdjustSteps {
            policy,
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        // Keep the whole lattice in view
        let extent = self.grid_size.unwrap_or(SurfaceLayout::default().grid_size) as f32;
        RenderConfig {
            camera_distance: defaults.camera_distance.max(extent * 1.25),
            start_wireframe: self.wireframe,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let args = Args::try_parse_from(["wavegrid"]).unwrap();

        assert_eq!(args.wave_spectrum().wave_count, WaveSpectrum::default().wave_count);
        assert_eq!(args.surface_layout().grid_size, SurfaceLayout::default().grid_size);
        assert_eq!(args.parse_color_policy(), ColorPolicy::RandomTint);
        assert_eq!(args.adjust_steps().policy, AdjustPolicy::Unclamped);
        assert!(args.headless.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wavegrid",
            "--grid-size",
            "8",
            "--waves",
            "2",
            "--steepness",
            "0.25",
            "--seed",
            "77",
            "--color",
            "gradient",
            "--normalize-directions",
            "--clamp",
            "--headless",
            "30",
        ])
        .unwrap();

        let spectrum = args.wave_spectrum();
        assert_eq!(spectrum.wave_count, 2);
        assert_eq!(spectrum.steepness, 0.25);
        assert_eq!(spectrum.seed, Some(77));
        assert!(spectrum.normalize_directions);

        let layout = args.surface_layout();
        assert_eq!(layout.grid_size, 8);
        assert_eq!(layout.color_policy, ColorPolicy::GridGradient);

        assert!(matches!(args.adjust_steps().policy, AdjustPolicy::Clamped { .. }));
        assert_eq!(args.headless, Some(30));
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let args = Args::try_parse_from(["wavegrid", "--color", "plaid"]).unwrap();
        assert_eq!(args.parse_color_policy(), ColorPolicy::RandomTint);
    }

    #[test]
    fn test_camera_backs_off_for_large_grids() {
        let args = Args::try_parse_from(["wavegrid", "--grid-size", "128"]).unwrap();
        assert!(args.render_config().camera_distance >= 160.0);
    }
}
