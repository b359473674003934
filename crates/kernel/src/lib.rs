//! Wave Kernel: the wave field evaluator and the parameters that drive it.
//!
//! # Invariants
//! - The evaluator is pure: identical (point, time, parameters) give bit-identical output.
//! - Parameters reach the evaluator by reference; there is no ambient global state.
//! - Non-finite values are rejected before they are published to readers.

pub mod evaluator;
pub mod handle;
pub mod noise;
pub mod params;

pub use evaluator::{MAX_RIPPLE_ITERATIONS, WaveSample, evaluate};
pub use handle::{ParamHandle, ParamReader, Snapshot};
pub use params::{
    Axis, ColorParam, DEFAULT_DEPTH_HEX, DEFAULT_SURFACE_HEX, ParamEdit, ScalarParam, WaveParameters,
};
