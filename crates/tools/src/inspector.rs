use seascape_kernel::{Axis, ColorParam, MAX_RIPPLE_ITERATIONS, ScalarParam, Snapshot, WaveParameters};

/// Parameter inspector for developer tooling.
///
/// Read-only queries over a parameter snapshot, for logging and the CLI.
pub struct ParamInspector;

impl ParamInspector {
    /// Produce a summary of a published snapshot.
    pub fn summary(snapshot: &Snapshot) -> ParamSummary {
        let p = &snapshot.params;
        ParamSummary {
            revision: snapshot.revision,
            big_wave_elevation: p.big_wave_elevation,
            big_wave_frequency: p.big_wave_frequency.to_array(),
            small_wave_iterations: p.small_wave_iterations,
            depth_hex: p.depth_color.to_hex(),
            surface_hex: p.surface_color.to_hex(),
            amplitude_bound: Self::amplitude_bound(p),
        }
    }

    /// Upper bound on |displacement|, assuming |noise| <= 1.1.
    pub fn amplitude_bound(params: &WaveParameters) -> f32 {
        let octaves = params.small_wave_iterations.min(MAX_RIPPLE_ITERATIONS);
        let harmonic: f32 = (1..=octaves).map(|i| 1.0 / i as f32).sum();
        params.big_wave_elevation.abs() + 1.1 * params.small_wave_elevation.abs() * harmonic
    }

    /// Names of the fields that differ between `a` and `b`.
    pub fn changed_fields(a: &WaveParameters, b: &WaveParameters) -> Vec<&'static str> {
        let mut changed: Vec<&'static str> = ScalarParam::ALL
            .into_iter()
            .filter(|&s| a.scalar(s) != b.scalar(s))
            .map(ScalarParam::name)
            .collect();
        changed.extend(
            [Axis::X, Axis::Y]
                .into_iter()
                .filter(|&axis| a.frequency(axis) != b.frequency(axis))
                .map(Axis::name),
        );
        if a.small_wave_iterations != b.small_wave_iterations {
            changed.push("small_wave_iterations");
        }
        changed.extend(
            [ColorParam::Depth, ColorParam::Surface]
                .into_iter()
                .filter(|&c| a.color(c) != b.color(c))
                .map(ColorParam::name),
        );
        changed
    }
}

/// Summary of the parameters in effect.
#[derive(Debug, Clone)]
pub struct ParamSummary {
    pub revision: u64,
    pub big_wave_elevation: f32,
    pub big_wave_frequency: [f32; 2],
    pub small_wave_iterations: u32,
    pub depth_hex: String,
    pub surface_hex: String,
    pub amplitude_bound: f32,
}

impl std::fmt::Display for ParamSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Params: revision={} elevation={:.3} frequency=({:.3}, {:.3}) octaves={} colors={}..{} |d|<={:.3}",
            self.revision,
            self.big_wave_elevation,
            self.big_wave_frequency[0],
            self.big_wave_frequency[1],
            self.small_wave_iterations,
            self.depth_hex,
            self.surface_hex,
            self.amplitude_bound,
        )
    }
}
