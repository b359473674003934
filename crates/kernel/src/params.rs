use glam::Vec2;
use seascape_common::{Color, ParamError};
use serde::{Deserialize, Serialize};

/// Default depth color as shown in the panel.
pub const DEFAULT_DEPTH_HEX: &str = "#71476d";
/// Default surface color as shown in the panel.
pub const DEFAULT_SURFACE_HEX: &str = "#ffffff";

/// Every tunable input of the wave field.
///
/// Created once at startup, edited from the debug panel for the lifetime
/// of the session, read once per frame. Missing fields in a preset fall
/// back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParameters {
    /// Amplitude of the primary wave.
    pub big_wave_elevation: f32,
    /// Spatial frequency of the primary wave along x (`.x`) and z (`.y`).
    pub big_wave_frequency: Vec2,
    /// Time scaling of the primary wave phase.
    pub big_wave_speed: f32,
    /// Amplitude of the first ripple octave.
    pub small_wave_elevation: f32,
    /// Spatial scale of the first ripple octave.
    pub small_wave_frequency: f32,
    /// Phase drift rate of the ripple noise.
    pub small_wave_time_speed: f32,
    /// Number of ripple octaves.
    pub small_wave_iterations: u32,
    /// Color at the bottom of the gradient (linear).
    pub depth_color: Color,
    /// Color at the top of the gradient (linear).
    pub surface_color: Color,
    pub color_offset: f32,
    pub color_multiplier: f32,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            big_wave_elevation: 0.2,
            big_wave_frequency: Vec2::new(4.0, 1.5),
            big_wave_speed: 0.75,
            small_wave_elevation: 0.15,
            small_wave_frequency: 3.0,
            small_wave_time_speed: 0.2,
            small_wave_iterations: 4,
            depth_color: Color::from_srgb_u8([0x71, 0x47, 0x6d]),
            surface_color: Color::from_srgb_u8([0xff, 0xff, 0xff]),
            color_offset: 0.5,
            color_multiplier: 2.0,
        }
    }
}

/// Scalar parameters addressable by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarParam {
    BigWaveElevation,
    BigWaveSpeed,
    SmallWaveElevation,
    SmallWaveFrequency,
    SmallWaveTimeSpeed,
    ColorOffset,
    ColorMultiplier,
}

impl ScalarParam {
    pub const ALL: [Self; 7] = [
        Self::BigWaveElevation,
        Self::BigWaveSpeed,
        Self::SmallWaveElevation,
        Self::SmallWaveFrequency,
        Self::SmallWaveTimeSpeed,
        Self::ColorOffset,
        Self::ColorMultiplier,
    ];

    /// Field name, as it appears in presets and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::BigWaveElevation => "big_wave_elevation",
            Self::BigWaveSpeed => "big_wave_speed",
            Self::SmallWaveElevation => "small_wave_elevation",
            Self::SmallWaveFrequency => "small_wave_frequency",
            Self::SmallWaveTimeSpeed => "small_wave_time_speed",
            Self::ColorOffset => "color_offset",
            Self::ColorMultiplier => "color_multiplier",
        }
    }
}

/// Component of `big_wave_frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "big_wave_frequency.x",
            Self::Y => "big_wave_frequency.y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorParam {
    Depth,
    Surface,
}

impl ColorParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Depth => "depth_color",
            Self::Surface => "surface_color",
        }
    }
}

/// A single change coming from the debug panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamEdit {
    Scalar(ScalarParam, f32),
    Frequency(Axis, f32),
    Iterations(u32),
    /// Colors arrive as the hex string the user typed or picked.
    Color(ColorParam, String),
}

impl WaveParameters {
    pub fn scalar(&self, param: ScalarParam) -> f32 {
        match param {
            ScalarParam::BigWaveElevation => self.big_wave_elevation,
            ScalarParam::BigWaveSpeed => self.big_wave_speed,
            ScalarParam::SmallWaveElevation => self.small_wave_elevation,
            ScalarParam::SmallWaveFrequency => self.small_wave_frequency,
            ScalarParam::SmallWaveTimeSpeed => self.small_wave_time_speed,
            ScalarParam::ColorOffset => self.color_offset,
            ScalarParam::ColorMultiplier => self.color_multiplier,
        }
    }

    fn scalar_mut(&mut self, param: ScalarParam) -> &mut f32 {
        match param {
            ScalarParam::BigWaveElevation => &mut self.big_wave_elevation,
            ScalarParam::BigWaveSpeed => &mut self.big_wave_speed,
            ScalarParam::SmallWaveElevation => &mut self.small_wave_elevation,
            ScalarParam::SmallWaveFrequency => &mut self.small_wave_frequency,
            ScalarParam::SmallWaveTimeSpeed => &mut self.small_wave_time_speed,
            ScalarParam::ColorOffset => &mut self.color_offset,
            ScalarParam::ColorMultiplier => &mut self.color_multiplier,
        }
    }

    pub fn frequency(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.big_wave_frequency.x,
            Axis::Y => self.big_wave_frequency.y,
        }
    }

    pub fn color(&self, which: ColorParam) -> Color {
        match which {
            ColorParam::Depth => self.depth_color,
            ColorParam::Surface => self.surface_color,
        }
    }

    /// Apply a panel edit. On error the parameters are left untouched.
    pub fn apply(&mut self, edit: &ParamEdit) -> Result<(), ParamError> {
        match edit {
            ParamEdit::Scalar(param, value) => {
                *self.scalar_mut(*param) = finite(param.name(), *value)?;
            }
            ParamEdit::Frequency(axis, value) => {
                let value = finite(axis.name(), *value)?;
                match axis {
                    Axis::X => self.big_wave_frequency.x = value,
                    Axis::Y => self.big_wave_frequency.y = value,
                }
            }
            ParamEdit::Iterations(n) => self.small_wave_iterations = *n,
            ParamEdit::Color(which, hex) => {
                let color = Color::from_hex(hex)?;
                match which {
                    ColorParam::Depth => self.depth_color = color,
                    ColorParam::Surface => self.surface_color = color,
                }
            }
        }
        Ok(())
    }

    /// Reject any non-finite value. Finite values outside the panel ranges
    /// are allowed.
    pub fn validate(&self) -> Result<(), ParamError> {
        for param in ScalarParam::ALL {
            finite(param.name(), self.scalar(param))?;
        }
        for axis in [Axis::X, Axis::Y] {
            finite(axis.name(), self.frequency(axis))?;
        }
        for which in [ColorParam::Depth, ColorParam::Surface] {
            let c = self.color(which);
            if !c.is_finite() {
                let value = [c.r, c.g, c.b]
                    .into_iter()
                    .find(|v| !v.is_finite())
                    .unwrap_or(f32::NAN);
                return Err(ParamError::NonFinite {
                    field: which.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ParamError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParamError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let p = WaveParameters::default();
        assert_eq!(p.big_wave_elevation, 0.2);
        assert_eq!(p.big_wave_frequency, Vec2::new(4.0, 1.5));
        assert_eq!(p.big_wave_speed, 0.75);
        assert_eq!(p.small_wave_elevation, 0.15);
        assert_eq!(p.small_wave_frequency, 3.0);
        assert_eq!(p.small_wave_time_speed, 0.2);
        assert_eq!(p.color_offset, 0.5);
        assert_eq!(p.color_multiplier, 2.0);
        assert_eq!(p.depth_color.to_hex(), DEFAULT_DEPTH_HEX);
        assert_eq!(p.surface_color.to_hex(), DEFAULT_SURFACE_HEX);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn apply_scalar_and_frequency() {
        let mut p = WaveParameters::default();
        p.apply(&ParamEdit::Scalar(ScalarParam::ColorOffset, 0.1))
            .unwrap();
        p.apply(&ParamEdit::Frequency(Axis::Y, 7.25)).unwrap();
        assert_eq!(p.color_offset, 0.1);
        assert_eq!(p.big_wave_frequency.y, 7.25);
        assert_eq!(p.big_wave_frequency.x, 4.0);
    }

    #[test]
    fn apply_color_converts_hex() {
        let mut p = WaveParameters::default();
        p.apply(&ParamEdit::Color(ColorParam::Depth, "#000000".into()))
            .unwrap();
        assert_eq!(p.depth_color, Color::BLACK);
    }

    #[test]
    fn non_finite_edit_is_rejected_without_mutation() {
        let mut p = WaveParameters::default();
        let before = p;
        let err = p
            .apply(&ParamEdit::Scalar(ScalarParam::BigWaveSpeed, f32::NAN))
            .unwrap_err();
        assert!(matches!(
            err,
            ParamError::NonFinite {
                field: "big_wave_speed",
                ..
            }
        ));
        assert!(
            p.apply(&ParamEdit::Frequency(Axis::X, f32::INFINITY))
                .is_err()
        );
        assert!(
            p.apply(&ParamEdit::Color(ColorParam::Surface, "#zzz".into()))
                .is_err()
        );
        assert_eq!(p, before);
    }

    #[test]
    fn out_of_range_but_finite_is_accepted() {
        let mut p = WaveParameters::default();
        p.apply(&ParamEdit::Scalar(ScalarParam::BigWaveElevation, -3.0))
            .unwrap();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_catches_programmatic_nan() {
        let p = WaveParameters {
            surface_color: Color::new(1.0, f32::NAN, 1.0),
            ..WaveParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ParamError::NonFinite {
                field: "surface_color",
                ..
            })
        ));
    }

    #[test]
    fn partial_preset_falls_back_to_defaults() {
        let p: WaveParameters =
            serde_json::from_str(r##"{"big_wave_speed": 0.3, "depth_color": "#000000"}"##)
                .unwrap();
        assert_eq!(p.big_wave_speed, 0.3);
        assert_eq!(p.depth_color, Color::BLACK);
        assert_eq!(p.small_wave_frequency, 3.0);
    }
}
