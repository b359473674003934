//! wgpu render backend for the seascape demo.
//!
//! Draws the water plane as one indexed mesh. Displacement and coloring run
//! in the wave shader, which mirrors `seascape_kernel::evaluate`; the CPU
//! side only uploads parameters, time and the camera matrix each frame.
//!
//! # Invariants
//! - The renderer never writes wave parameters back.
//! - Camera motion is independent of the wave field.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::{WaterFrame, WaterRenderer, WaterUniforms};
pub use shaders::WATER_SHADER;
