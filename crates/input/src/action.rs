/// A high-level action produced from pointer or keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Orbit the camera by a pointer delta in physical pixels.
    Orbit { dx: f32, dy: f32 },
    /// Zoom the camera. Positive moves closer.
    Zoom(f32),
    /// Show or hide the debug panel.
    TogglePanel,
    /// Restore default wave parameters.
    ResetParameters,
    /// Close the viewer.
    Quit,
    /// Input with no binding.
    Noop,
}
