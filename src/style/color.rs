use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels, not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (opacity)
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// Creates a color from `f32` channel values in the range `0.0 ..= 1.0`.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Color {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Color {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: channel(a),
        }
    }

    /// Returns the channels as `f64` in the range `0.0 ..= 1.0`, in r, g, b, a order.
    pub fn to_f64(&self) -> [f64; 4] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        ]
    }

    /// Returns the same color with the alpha channel replaced.
    pub fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f32_rounds_and_clamps() {
        let c = Color::from_f32(1.0, 0.5, -1.0, 2.0);
        assert_eq!(c, Color::new(255, 128, 0, 255));
    }

    #[test]
    fn to_f64_is_normalized() {
        let [r, g, b, a] = Color::new(255, 0, 51, 0).to_f64();
        assert_eq!((r, g, a), (1.0, 0.0, 0.0));
        assert!((b - 0.2).abs() < 1e-12);
        assert_eq!(Color::TRANSPARENT.to_f64(), [0.0; 4]);
        assert_eq!(Color::WHITE.with_alpha(0), Color::new(255, 255, 255, 0));
    }
}
