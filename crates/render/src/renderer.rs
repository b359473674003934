use crate::mesh::SurfaceMesh;
use seascape_common::{FrameState, SurfacePoint};
use seascape_kernel::{WaveParameters, evaluate};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer receives the frame timing and an immutable parameter
/// snapshot, and produces output. It never writes parameters back.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameState, params: &WaveParameters) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable summary of one frame: the parameters in effect
/// and displacement statistics over a coarse sample grid. Used by the CLI and
/// by tests of the frame loop.
#[derive(Debug)]
pub struct DebugTextRenderer {
    grid: SurfaceMesh,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::with_grid_segments(8)
    }

    /// Sample the water plane on `segments` x `segments` cells.
    pub fn with_grid_segments(segments: u32) -> Self {
        Self {
            grid: SurfaceMesh::plane(
                SurfaceMesh::WATER_SIZE,
                SurfaceMesh::WATER_SIZE,
                segments,
                segments,
            ),
        }
    }
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameState, params: &WaveParameters) -> String {
        let t = frame.elapsed;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for p in self.grid.points() {
            let d = evaluate(*p, t, params).displacement;
            min = min.min(d);
            max = max.max(d);
            sum += f64::from(d);
        }
        let mean = sum / self.grid.vertex_count() as f64;
        let origin = evaluate(SurfacePoint::ORIGIN, t, params);

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame {} (t={:.3}s, dt={:.3}s) ===",
            frame.frame, frame.elapsed, frame.delta
        );
        let _ = writeln!(
            out,
            "Big waves: elevation={:.3} frequency=({:.3}, {:.3}) speed={:.3}",
            params.big_wave_elevation,
            params.big_wave_frequency.x,
            params.big_wave_frequency.y,
            params.big_wave_speed
        );
        let _ = writeln!(
            out,
            "Small waves: elevation={:.3} frequency={:.3} speed={:.3} iterations={}",
            params.small_wave_elevation,
            params.small_wave_frequency,
            params.small_wave_time_speed,
            params.small_wave_iterations
        );
        let _ = writeln!(
            out,
            "Colors: depth={} surface={} offset={:.3} multiplier={:.3}",
            params.depth_color.to_hex(),
            params.surface_color.to_hex(),
            params.color_offset,
            params.color_multiplier
        );
        let _ = writeln!(
            out,
            "Displacement over {} samples: min={min:.4} max={max:.4} mean={mean:.4}",
            self.grid.vertex_count()
        );
        let _ = writeln!(
            out,
            "Origin: displacement={:.4} mix={:.3} color={}",
            origin.displacement,
            origin.mix,
            origin.color.to_hex()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renderer_reports_frame_and_params() {
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&FrameState::at(0.0), &WaveParameters::default());

        assert!(output.contains("Frame 0"));
        assert!(output.contains("frequency=(4.000, 1.500)"));
        assert!(output.contains("depth=#71476d"));
        assert!(output.contains("over 81 samples"));
        // Origin at t=0 sits exactly on the surface color.
        assert!(output.contains("Origin: displacement=0.0000 mix=1.000 color=#ffffff"));
    }

    #[test]
    fn flat_water_reports_zero_range() {
        let params = WaveParameters {
            big_wave_elevation: 0.0,
            small_wave_elevation: 0.0,
            ..WaveParameters::default()
        };
        let mut renderer = DebugTextRenderer::with_grid_segments(2);
        let output = renderer.render(&FrameState::at(5.0), &params);
        assert!(output.contains("min=0.0000 max=0.0000"), "{output}");
    }
}
