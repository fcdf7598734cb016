use serde::{Deserialize, Serialize};

use crate::style::Color;

/// How two stroked segments are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    #[default]
    Miter,
    /// Miter that reverts to bevel past the limit. Backends have no equivalent.
    MiterRevert,
    Round,
    Bevel,
}

/// How the ends of an open stroked path are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Butt,
    Square,
    Round,
}

/// Stroke parameters of a line symbolizer. Lengths are in device pixels
/// before the render scale factor is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub color: Color,
    pub opacity: f64,
    pub width: f64,
    pub line_join: LineJoin,
    pub line_cap: LineCap,
    /// (on, off) length pairs; empty means solid
    pub dash: Vec<(f64, f64)>,
    pub dash_offset: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            opacity: 1.0,
            width: 1.0,
            line_join: LineJoin::default(),
            line_cap: LineCap::default(),
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    pub fn has_dash(&self) -> bool {
        !self.dash.is_empty()
    }

    pub fn add_dash(&mut self, on: f64, off: f64) {
        self.dash.push((on, off));
    }
}
