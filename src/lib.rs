//! Wavegrid library - Gerstner wave surface simulation

pub mod camera;
pub mod cli;
pub mod controls;
pub mod params;
pub mod rendering;
pub mod surface;
pub mod wave;
