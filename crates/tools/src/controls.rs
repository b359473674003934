use seascape_kernel::{Axis, ColorParam, ParamEdit, ParamHandle, ScalarParam, WaveParameters};

/// How a panel row edits its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Slider {
        param: ScalarParam,
        min: f32,
        max: f32,
        step: f32,
    },
    Frequency {
        axis: Axis,
        min: f32,
        max: f32,
        step: f32,
    },
    Iterations {
        min: u32,
        max: u32,
    },
    Color(ColorParam),
}

/// One row of the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpec {
    pub label: &'static str,
    pub kind: ControlKind,
}

impl ControlSpec {
    const fn slider(label: &'static str, param: ScalarParam, max: f32) -> Self {
        Self {
            label,
            kind: ControlKind::Slider {
                param,
                min: 0.0,
                max,
                step: 0.001,
            },
        }
    }

    const fn frequency(label: &'static str, axis: Axis) -> Self {
        Self {
            label,
            kind: ControlKind::Frequency {
                axis,
                min: 0.0,
                max: 10.0,
                step: 0.001,
            },
        }
    }

    /// Numeric value shown by this row, or `None` for color rows.
    pub fn value(&self, params: &WaveParameters) -> Option<f32> {
        match self.kind {
            ControlKind::Slider { param, .. } => Some(params.scalar(param)),
            ControlKind::Frequency { axis, .. } => Some(params.frequency(axis)),
            ControlKind::Iterations { .. } => Some(params.small_wave_iterations as f32),
            ControlKind::Color(_) => None,
        }
    }

    /// Edit produced when the row's slider moves to `value`. Iteration
    /// counts are rounded and kept within the row's range.
    pub fn edit(&self, value: f32) -> Option<ParamEdit> {
        match self.kind {
            ControlKind::Slider { param, .. } => Some(ParamEdit::Scalar(param, value)),
            ControlKind::Frequency { axis, .. } => Some(ParamEdit::Frequency(axis, value)),
            ControlKind::Iterations { min, max } => {
                if !value.is_finite() {
                    return None;
                }
                let n = value.round().clamp(min as f32, max as f32) as u32;
                Some(ParamEdit::Iterations(n))
            }
            ControlKind::Color(_) => None,
        }
    }
}

/// Rows of the debug panel, top to bottom.
pub const PANEL_CONTROLS: [ControlSpec; 12] = [
    ControlSpec::slider("Big waves elevation", ScalarParam::BigWaveElevation, 1.0),
    ControlSpec::frequency("Big waves frequency x", Axis::X),
    ControlSpec::frequency("Big waves frequency y", Axis::Y),
    ControlSpec::slider("Big waves speed", ScalarParam::BigWaveSpeed, 1.0),
    ControlSpec {
        label: "Depth color",
        kind: ControlKind::Color(ColorParam::Depth),
    },
    ControlSpec {
        label: "Surface color",
        kind: ControlKind::Color(ColorParam::Surface),
    },
    ControlSpec::slider("Color offset", ScalarParam::ColorOffset, 1.0),
    ControlSpec::slider("Color multiplier", ScalarParam::ColorMultiplier, 10.0),
    ControlSpec::slider("Small waves speed", ScalarParam::SmallWaveTimeSpeed, 1.0),
    ControlSpec::slider("Small waves frequency", ScalarParam::SmallWaveFrequency, 10.0),
    ControlSpec::slider("Small waves elevation", ScalarParam::SmallWaveElevation, 1.0),
    ControlSpec {
        label: "Small waves iterations",
        kind: ControlKind::Iterations {
            min: 0,
            max: seascape_kernel::MAX_RIPPLE_ITERATIONS,
        },
    },
];

/// Panel-side state that outlives a single UI pass: the text in the hex
/// fields and the message from the last rejected edit.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub visible: bool,
    depth_hex: String,
    surface_hex: String,
    last_error: Option<String>,
}

impl PanelState {
    pub fn new(params: &WaveParameters) -> Self {
        Self {
            visible: true,
            depth_hex: params.depth_color.to_hex(),
            surface_hex: params.surface_color.to_hex(),
            last_error: None,
        }
    }

    pub fn hex(&self, which: ColorParam) -> &str {
        match which {
            ColorParam::Depth => &self.depth_hex,
            ColorParam::Surface => &self.surface_hex,
        }
    }

    /// Text buffer backing a color row's hex field.
    pub fn hex_mut(&mut self, which: ColorParam) -> &mut String {
        match which {
            ColorParam::Depth => &mut self.depth_hex,
            ColorParam::Surface => &mut self.surface_hex,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Refresh the hex fields from `params`, e.g. after a reset.
    pub fn sync(&mut self, params: &WaveParameters) {
        self.depth_hex = params.depth_color.to_hex();
        self.surface_hex = params.surface_color.to_hex();
    }

    /// Forward an edit to the writer. A rejected edit leaves the parameters
    /// as they were and is reported in the panel.
    pub fn submit(&mut self, handle: &mut ParamHandle, edit: ParamEdit) -> bool {
        match handle.apply(&edit) {
            Ok(_) => {
                self.last_error = None;
                if let ParamEdit::Color(which, _) = edit {
                    *self.hex_mut(which) = handle.params().color(which).to_hex();
                }
                true
            }
            Err(e) => {
                tracing::warn!(?edit, error = %e, "panel edit rejected");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Restore defaults through the writer.
    pub fn reset(&mut self, handle: &mut ParamHandle) {
        handle.reset();
        self.last_error = None;
        self.sync(handle.params());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_kernel::DEFAULT_DEPTH_HEX;

    fn handle() -> ParamHandle {
        ParamHandle::new(WaveParameters::default()).unwrap()
    }

    #[test]
    fn every_parameter_has_a_row() {
        let scalars: Vec<ScalarParam> = PANEL_CONTROLS
            .iter()
            .filter_map(|c| match c.kind {
                ControlKind::Slider { param, .. } => Some(param),
                _ => None,
            })
            .collect();
        for param in ScalarParam::ALL {
            assert!(scalars.contains(&param), "{} has no slider", param.name());
        }
        let colors = PANEL_CONTROLS
            .iter()
            .filter(|c| matches!(c.kind, ControlKind::Color(_)))
            .count();
        assert_eq!(colors, 2);
        assert!(
            PANEL_CONTROLS
                .iter()
                .any(|c| matches!(c.kind, ControlKind::Iterations { .. }))
        );
    }

    #[test]
    fn defaults_sit_inside_slider_ranges() {
        let params = WaveParameters::default();
        for control in &PANEL_CONTROLS {
            let (min, max) = match control.kind {
                ControlKind::Slider { min, max, .. } | ControlKind::Frequency { min, max, .. } => {
                    (min, max)
                }
                ControlKind::Iterations { min, max } => (min as f32, max as f32),
                ControlKind::Color(_) => continue,
            };
            let value = control.value(&params).unwrap();
            assert!(
                (min..=max).contains(&value),
                "{} default {value} outside [{min}, {max}]",
                control.label
            );
        }
    }

    #[test]
    fn slider_edits_target_their_parameter() {
        let speed = PANEL_CONTROLS[3];
        assert_eq!(
            speed.edit(0.3),
            Some(ParamEdit::Scalar(ScalarParam::BigWaveSpeed, 0.3))
        );
        assert_eq!(
            PANEL_CONTROLS[2].edit(2.0),
            Some(ParamEdit::Frequency(Axis::Y, 2.0))
        );
        assert_eq!(PANEL_CONTROLS[4].edit(1.0), None);
    }

    #[test]
    fn iteration_edits_round_and_clamp() {
        let iterations = PANEL_CONTROLS[11];
        assert_eq!(iterations.edit(2.6), Some(ParamEdit::Iterations(3)));
        assert_eq!(iterations.edit(40.0), Some(ParamEdit::Iterations(8)));
        assert_eq!(iterations.edit(-1.0), Some(ParamEdit::Iterations(0)));
        assert_eq!(iterations.edit(f32::NAN), None);
    }

    #[test]
    fn submit_reports_rejected_edits() {
        let mut handle = handle();
        let mut panel = PanelState::new(handle.params());
        let before = *handle.params();

        let ok = panel.submit(
            &mut handle,
            ParamEdit::Scalar(ScalarParam::ColorOffset, f32::INFINITY),
        );
        assert!(!ok);
        assert_eq!(*handle.params(), before);
        assert!(panel.last_error().unwrap().contains("color_offset"));

        assert!(panel.submit(
            &mut handle,
            ParamEdit::Scalar(ScalarParam::ColorOffset, 0.25)
        ));
        assert_eq!(panel.last_error(), None);
        assert_eq!(handle.params().color_offset, 0.25);
    }

    #[test]
    fn color_submit_normalizes_hex_field() {
        let mut handle = handle();
        let mut panel = PanelState::new(handle.params());
        assert_eq!(panel.hex(ColorParam::Depth), DEFAULT_DEPTH_HEX);

        *panel.hex_mut(ColorParam::Depth) = "0F0".to_string();
        let typed = panel.hex(ColorParam::Depth).to_string();
        assert!(panel.submit(&mut handle, ParamEdit::Color(ColorParam::Depth, typed)));
        assert_eq!(panel.hex(ColorParam::Depth), "#00ff00");

        assert!(!panel.submit(
            &mut handle,
            ParamEdit::Color(ColorParam::Surface, "#zzzzzz".to_string())
        ));
        assert_eq!(panel.hex(ColorParam::Surface), "#ffffff");
    }

    #[test]
    fn reset_restores_defaults_and_fields() {
        let mut handle = handle();
        let mut panel = PanelState::new(handle.params());
        panel.submit(
            &mut handle,
            ParamEdit::Color(ColorParam::Depth, "#123456".to_string()),
        );
        panel.reset(&mut handle);
        assert_eq!(*handle.params(), WaveParameters::default());
        assert_eq!(panel.hex(ColorParam::Depth), DEFAULT_DEPTH_HEX);
    }
}
