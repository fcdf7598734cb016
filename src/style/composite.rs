use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Compositing operator requested by a symbolizer.
///
/// Names follow the toolkit's style vocabulary (`"src-over"`, `"multiply"`, ...).
/// Several toolkit modes have no counterpart in 2D backends; they are kept so
/// styles round-trip, and paint translation treats them as `SrcOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    Plus,
    Minus,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Contrast,
    Invert,
    InvertRgb,
    GrainMerge,
    GrainExtract,
    Hue,
    Saturation,
    Color,
    Value,
    LinearDodge,
    LinearBurn,
    Divide,
}

const NAMES: &[(CompositeMode, &str)] = &[
    (CompositeMode::Clear, "clear"),
    (CompositeMode::Src, "src"),
    (CompositeMode::Dst, "dst"),
    (CompositeMode::SrcOver, "src-over"),
    (CompositeMode::DstOver, "dst-over"),
    (CompositeMode::SrcIn, "src-in"),
    (CompositeMode::DstIn, "dst-in"),
    (CompositeMode::SrcOut, "src-out"),
    (CompositeMode::DstOut, "dst-out"),
    (CompositeMode::SrcAtop, "src-atop"),
    (CompositeMode::DstAtop, "dst-atop"),
    (CompositeMode::Xor, "xor"),
    (CompositeMode::Plus, "plus"),
    (CompositeMode::Minus, "minus"),
    (CompositeMode::Multiply, "multiply"),
    (CompositeMode::Screen, "screen"),
    (CompositeMode::Overlay, "overlay"),
    (CompositeMode::Darken, "darken"),
    (CompositeMode::Lighten, "lighten"),
    (CompositeMode::ColorDodge, "color-dodge"),
    (CompositeMode::ColorBurn, "color-burn"),
    (CompositeMode::HardLight, "hard-light"),
    (CompositeMode::SoftLight, "soft-light"),
    (CompositeMode::Difference, "difference"),
    (CompositeMode::Exclusion, "exclusion"),
    (CompositeMode::Contrast, "contrast"),
    (CompositeMode::Invert, "invert"),
    (CompositeMode::InvertRgb, "invert-rgb"),
    (CompositeMode::GrainMerge, "grain-merge"),
    (CompositeMode::GrainExtract, "grain-extract"),
    (CompositeMode::Hue, "hue"),
    (CompositeMode::Saturation, "saturation"),
    (CompositeMode::Color, "color"),
    (CompositeMode::Value, "value"),
    (CompositeMode::LinearDodge, "linear-dodge"),
    (CompositeMode::LinearBurn, "linear-burn"),
    (CompositeMode::Divide, "divide"),
];

impl CompositeMode {
    /// All modes, in declaration order.
    pub fn all() -> impl Iterator<Item = CompositeMode> {
        NAMES.iter().map(|(mode, _)| *mode)
    }

    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, name)| *name)
            .unwrap_or("src-over")
    }

    /// Parses a mode name, falling back to `SrcOver` for anything unknown.
    pub fn parse_or_default(name: &str) -> CompositeMode {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown composite mode: {0}")]
pub struct UnknownCompositeMode(pub String);

impl FromStr for CompositeMode {
    type Err = UnknownCompositeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(mode, _)| *mode)
            .ok_or_else(|| UnknownCompositeMode(s.to_string()))
    }
}
