//! The wave field evaluator.
//!
//! Maps a point on the undisplaced plane and a time to a vertical
//! displacement and a shaded color. The WGSL water shader performs the same
//! steps per vertex (displacement) and per fragment (color); this module is
//! the reference used by tests, tooling and the CPU renderers.

use crate::noise::classic_noise;
use crate::params::WaveParameters;
use glam::Vec3;
use seascape_common::{Color, SurfacePoint};

/// Upper bound on ripple octaves regardless of what the parameters ask for.
pub const MAX_RIPPLE_ITERATIONS: u32 = 8;

/// Output of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSample {
    /// Height offset along +Y.
    pub displacement: f32,
    /// Gradient position in [0, 1]: 0 is the depth color, 1 the surface color.
    pub mix: f32,
    pub color: Color,
}

/// Primary wave: product of one phase-shifted sine per axis sharing a
/// time-driven phase.
pub fn primary_wave(p: SurfacePoint, time: f32, params: &WaveParameters) -> f32 {
    let phase = time * params.big_wave_speed;
    params.big_wave_elevation
        * (p.x * params.big_wave_frequency.x + phase).sin()
        * (p.z * params.big_wave_frequency.y + phase).sin()
}

/// Ripple layer: octave `i` samples noise at `i` times the base frequency
/// with `1 / i` of the amplitude. The absolute value is subtracted so the
/// ripples carve troughs rather than raise crests.
pub fn ripple(p: SurfacePoint, time: f32, params: &WaveParameters) -> f32 {
    let octaves = params.small_wave_iterations.min(MAX_RIPPLE_ITERATIONS);
    let drift = time * params.small_wave_time_speed;
    let mut height = 0.0;
    for i in 1..=octaves {
        let i = i as f32;
        let scale = params.small_wave_frequency * i;
        let n = classic_noise(Vec3::new(p.x * scale, p.z * scale, drift));
        height -= n.abs() * params.small_wave_elevation / i;
    }
    height
}

/// Total height offset. Huge finite inputs can overflow a phase to infinity
/// and `sin` turns that into NaN; such points sit flat at 0.
pub fn displacement(p: SurfacePoint, time: f32, params: &WaveParameters) -> f32 {
    let d = primary_wave(p, time, params) + ripple(p, time, params);
    if d.is_finite() { d } else { 0.0 }
}

/// Gradient position for a displacement, clamped to [0, 1].
pub fn mix_factor(displacement: f32, params: &WaveParameters) -> f32 {
    let m = (displacement + params.color_offset) * params.color_multiplier;
    // inf * 0 can still appear with huge finite inputs.
    if m.is_nan() { 0.0 } else { m.clamp(0.0, 1.0) }
}

pub fn shade(mix: f32, params: &WaveParameters) -> Color {
    params.depth_color.lerp(params.surface_color, mix)
}

/// Evaluate the wave field at one point and time.
pub fn evaluate(p: SurfacePoint, time: f32, params: &WaveParameters) -> WaveSample {
    let displacement = displacement(p, time, params);
    let mix = mix_factor(displacement, params);
    WaveSample {
        displacement,
        mix,
        color: shade(mix, params),
    }
}
