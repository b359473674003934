//! Shared value types used across the seascape workspace.
//!
//! # Invariants
//! - Colors are stored in linear space; hex strings are always sRGB.
//! - Nothing in this crate touches the GPU or the windowing system.

mod color;
mod error;
mod types;

pub use color::Color;
pub use error::ParamError;
pub use types::{FrameState, SurfacePoint};
