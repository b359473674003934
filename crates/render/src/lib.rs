//! Rendering Adapter: renderer-agnostic frame loop and surface description.
//!
//! # Invariants
//! - Renderers never mutate wave parameters; they receive a snapshot per frame.
//! - Each `FrameLoop::tick` samples the clock once, snapshots parameters once,
//!   and invokes the renderer exactly once.
//! - Elapsed time handed to renderers never decreases.

mod frame_loop;
mod heightfield;
mod mesh;
mod renderer;
mod viewport;

pub use frame_loop::{Clock, FixedClock, FrameLoop, SystemClock};
pub use heightfield::{Heightfield, HeightfieldRenderer, HeightfieldStats};
pub use mesh::SurfaceMesh;
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::{MAX_PIXEL_RATIO, Viewport};

pub fn crate_info() -> &'static str {
    "seascape-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
