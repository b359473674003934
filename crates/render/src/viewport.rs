/// Upper bound on device pixels rendered per logical pixel.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Window size and density, updated on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Physical width reported by the window.
    pub width: u32,
    /// Physical height reported by the window.
    pub height: u32,
    /// Device pixels per logical pixel.
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Camera aspect ratio. Never divides by zero.
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Density actually rendered at: the device ratio capped at [`MAX_PIXEL_RATIO`].
    pub fn pixel_ratio(&self) -> f64 {
        if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.scale_factor.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Size of the render target in pixels, at least 1x1.
    pub fn render_size(&self) -> (u32, u32) {
        let scale = if self.scale_factor.is_finite() && self.scale_factor > 0.0 {
            self.pixel_ratio() / self.scale_factor
        } else {
            1.0
        };
        let w = (self.width as f64 * scale).round() as u32;
        let h = (self.height as f64 * scale).round() as u32;
        (w.max(1), h.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}
