use std::sync::Arc;

use kurbo::{Point, Vec2};

use crate::style::CharFormat;

/// One laid-out glyph of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphNode {
    pub glyph: char,
    /// Offset from the placement center, y up
    pub offset: Vec2,
    /// Rotation in radians, counter-clockwise
    pub angle: f64,
    pub format: Arc<CharFormat>,
}

impl GlyphNode {
    pub fn new(glyph: char, offset: Vec2, angle: f64, format: Arc<CharFormat>) -> Self {
        Self {
            glyph,
            offset,
            angle,
            format,
        }
    }

    /// Device-space origin of the glyph for a placement centered at `center`.
    pub fn origin(&self, center: Point) -> Point {
        Point::new(center.x + self.offset.x, center.y - self.offset.y)
    }

    /// Rotation in backend convention: degrees, clockwise in device space.
    pub fn rotation_degrees(&self) -> f64 {
        -180.0 * (self.angle / std::f64::consts::PI)
    }
}

/// An accepted label instance: a center in device space plus its glyphs in
/// drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub center: Point,
    pub nodes: Vec<GlyphNode>,
}

impl Placement {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: GlyphNode) {
        self.nodes.push(node);
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
