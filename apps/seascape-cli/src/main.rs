use clap::{Parser, Subcommand, ValueEnum};
use seascape_common::{FrameState, SurfacePoint};
use seascape_kernel::{ParamHandle, WaveParameters, evaluate};
use seascape_render::{
    DebugTextRenderer, FixedClock, FrameLoop, HeightfieldRenderer, Renderer, SurfaceMesh,
};
use seascape_tools::{ParamInspector, PresetFormat, load_preset};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seascape-cli", about = "CLI tool for the seascape wave field")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Preset file (.yaml, .yml or .json) overriding the default parameters
    #[arg(short, long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the parameters in effect
    Info,
    /// Evaluate the wave field at one point
    Sample {
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        x: f32,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        z: f32,
        /// Elapsed time in seconds
        #[arg(short, long, default_value = "0")]
        time: f32,
    },
    /// Run the frame loop headlessly and print a summary of each frame
    Frames {
        /// Number of frames to run
        #[arg(short, long, default_value = "5")]
        count: u64,
        /// Seconds between frames
        #[arg(short, long, default_value_t = 1.0 / 60.0)]
        step: f32,
    },
    /// Evaluate every vertex of the water plane and report statistics
    Stats {
        /// Elapsed time in seconds
        #[arg(short, long, default_value = "0")]
        time: f32,
        /// Segments per side of the plane
        #[arg(short, long, default_value_t = SurfaceMesh::WATER_SEGMENTS)]
        segments: u32,
    },
    /// Print the default parameters as a preset document
    Defaults {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for PresetFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => PresetFormat::Yaml,
            Format::Json => PresetFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let params = match &cli.params {
        Some(path) => load_preset(path)?,
        None => WaveParameters::default(),
    };
    let handle = ParamHandle::new(params)?;
    tracing::debug!(revision = handle.revision(), "parameters ready");

    match cli.command {
        Commands::Info => {
            println!("seascape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", seascape_render::crate_info());
            println!("{}", ParamInspector::summary(&handle.reader().snapshot()));
            let changed = ParamInspector::changed_fields(&WaveParameters::default(), handle.params());
            if !changed.is_empty() {
                println!("Overrides: {}", changed.join(", "));
            }
        }
        Commands::Sample { x, z, time } => {
            let sample = evaluate(SurfacePoint::new(x, z), time, handle.params());
            println!("Point: x={x} z={z} t={time}s");
            println!("Displacement: {:.6}", sample.displacement);
            println!("Mix: {:.6}", sample.mix);
            println!(
                "Color: {} (linear {:.5}, {:.5}, {:.5})",
                sample.color.to_hex(),
                sample.color.r,
                sample.color.g,
                sample.color.b
            );
        }
        Commands::Frames { count, step } => {
            tracing::debug!(count, step, "running frames headless");
            let mut frames = FrameLoop::new(FixedClock::new(0.0, step));
            let mut renderer = DebugTextRenderer::new();
            for (_, text) in frames.run(count, &handle.reader(), &mut renderer) {
                print!("{text}");
            }
        }
        Commands::Stats { time, segments } => {
            let mesh = SurfaceMesh::plane(
                SurfaceMesh::WATER_SIZE,
                SurfaceMesh::WATER_SIZE,
                segments,
                segments,
            );
            let (width, depth) = mesh.size();
            println!(
                "Surface: {width}x{depth} units, {segments}x{segments} segments, {} vertices, {} triangles",
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            let mut renderer = HeightfieldRenderer::new(mesh);
            let start = Instant::now();
            let field = renderer.render(&FrameState::at(time), handle.params());
            let elapsed = start.elapsed();
            tracing::debug!(?elapsed, vertices = field.heights.len(), "surface evaluated");
            let stats = field.stats();
            println!(
                "Displacement at t={time}s: min={:.5} max={:.5} mean={:.5}",
                stats.min, stats.max, stats.mean
            );
            println!(
                "Bound: |d| <= {:.5}",
                ParamInspector::amplitude_bound(handle.params())
            );
            println!(
                "Evaluated in {:.2}ms ({:.1} ns/vertex)",
                elapsed.as_secs_f64() * 1000.0,
                elapsed.as_nanos() as f64 / field.heights.len() as f64
            );
        }
        Commands::Defaults { format } => {
            let text = PresetFormat::from(format).encode(&WaveParameters::default())?;
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
