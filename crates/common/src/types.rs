use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A position on the undisplaced water plane.
///
/// The plane lies in world XZ; displacement is applied along +Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f32,
    pub z: f32,
}

impl SurfacePoint {
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

impl From<Vec2> for SurfacePoint {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Per-frame timing handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameState {
    /// Zero-based index of this frame.
    pub frame: u64,
    /// Seconds since the session started. Never decreases.
    pub elapsed: f32,
    /// Seconds since the previous frame (0 on the first frame).
    pub delta: f32,
}

impl FrameState {
    /// A frame at an arbitrary point in time, for one-off evaluation.
    pub fn at(elapsed: f32) -> Self {
        Self {
            frame: 0,
            elapsed,
            delta: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_point_from_vec2_maps_y_to_z() {
        let p = SurfacePoint::from(Vec2::new(0.25, -0.5));
        assert_eq!(p.x, 0.25);
        assert_eq!(p.z, -0.5);
    }

    #[test]
    fn frame_at_has_no_delta() {
        let f = FrameState::at(3.5);
        assert_eq!(f.elapsed, 3.5);
        assert_eq!(f.delta, 0.0);
        assert_eq!(f.frame, 0);
    }
}
