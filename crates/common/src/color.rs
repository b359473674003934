use crate::ParamError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear-space RGB color.
///
/// Serialized as an sRGB hex string (`"#71476d"`) so preset files stay
/// readable and round-trip through the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (sRGB) into linear space.
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let invalid = || ParamError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let rgb = match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                [
                    channel(0).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                    channel(4).map_err(|_| invalid())?,
                ]
            }
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
                [
                    channel(0).map_err(|_| invalid())?,
                    channel(1).map_err(|_| invalid())?,
                    channel(2).map_err(|_| invalid())?,
                ]
            }
            _ => return Err(invalid()),
        };
        Ok(Self::from_srgb_u8(rgb))
    }

    /// Lowercase `#rrggbb` of this color after converting back to sRGB.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_srgb_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn from_srgb_u8(rgb: [u8; 3]) -> Self {
        let lin = |c: u8| srgb_to_linear(f64::from(c) / 255.0) as f32;
        Self::new(lin(rgb[0]), lin(rgb[1]), lin(rgb[2]))
    }

    pub fn to_srgb_u8(self) -> [u8; 3] {
        let enc = |c: f32| {
            let s = linear_to_srgb(f64::from(c).clamp(0.0, 1.0));
            (s * 255.0).round() as u8
        };
        [enc(self.r), enc(self.g), enc(self.b)]
    }

    /// Linear interpolation with exact endpoints: `t = 0` yields `self`,
    /// `t = 1` yields `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let s = 1.0 - t;
        Self::new(
            self.r * s + other.r * t,
            self.g * s + other.g * t,
            self.b * s + other.b * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ParamError;

    fn try_from(hex: String) -> Result<Self, Self::Error> {
        Self::from_hex(&hex)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c < 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(0.41666) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_and_black_hex() {
        let white = Color::from_hex("#ffffff").unwrap();
        assert!((white.r - 1.0).abs() < 1e-6);
        assert!((white.b - 1.0).abs() < 1e-6);
        assert_eq!(Color::from_hex("#000").unwrap(), Color::BLACK);
    }

    #[test]
    fn hex_is_converted_to_linear() {
        let depth = Color::from_hex("#71476d").unwrap();
        // 0x71 = 113 -> 0.443 sRGB -> ~0.165 linear
        assert!((depth.r - 0.165).abs() < 0.002, "r = {}", depth.r);
        assert!(depth.g < depth.b);
        assert_eq!(depth.to_hex(), "#71476d");
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!(
            Color::from_hex("#fa0").unwrap(),
            Color::from_hex("ffaa00").unwrap()
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12345", "#gggggg", "#1234567", "blue", "#+1+2+3"] {
            assert!(
                matches!(Color::from_hex(bad), Err(ParamError::InvalidHex(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::from_hex("#71476d").unwrap();
        let b = Color::from_hex("#3399cc").unwrap();
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn string_conversion_round_trips() {
        let c = Color::from_hex("#71476d").unwrap();
        let hex = String::from(c);
        assert_eq!(hex, "#71476d");
        assert_eq!(Color::try_from(hex).unwrap(), c);
    }
}
