use std::sync::Arc;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

use crate::style::{Color, CompositeMode, Stroke, TransformList};

/// Point reduction algorithm used by the simplify stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimplifyAlgorithm {
    #[default]
    RadialDistance,
    DouglasPeucker,
}

/// A style rule describing how to draw one kind of geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbolizer {
    Line(LineSymbolizer),
    Polygon(PolygonSymbolizer),
    Text(TextSymbolizer),
}

impl Symbolizer {
    pub fn kind(&self) -> &'static str {
        match self {
            Symbolizer::Line(_) => "line",
            Symbolizer::Polygon(_) => "polygon",
            Symbolizer::Text(_) => "text",
        }
    }
}

impl From<LineSymbolizer> for Symbolizer {
    fn from(sym: LineSymbolizer) -> Self {
        Symbolizer::Line(sym)
    }
}

impl From<PolygonSymbolizer> for Symbolizer {
    fn from(sym: PolygonSymbolizer) -> Self {
        Symbolizer::Polygon(sym)
    }
}

impl From<TextSymbolizer> for Symbolizer {
    fn from(sym: TextSymbolizer) -> Self {
        Symbolizer::Text(sym)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSymbolizer {
    pub stroke: Stroke,
    pub comp_op: CompositeMode,
    /// Clip against the layer query extent before projecting
    pub clip: bool,
    pub simplify_tolerance: f64,
    pub simplify_algorithm: SimplifyAlgorithm,
    pub smooth: f64,
    pub transform: TransformList,
}

impl Default for LineSymbolizer {
    fn default() -> Self {
        Self {
            stroke: Stroke::default(),
            comp_op: CompositeMode::default(),
            clip: true,
            simplify_tolerance: 0.0,
            simplify_algorithm: SimplifyAlgorithm::default(),
            smooth: 0.0,
            transform: TransformList::default(),
        }
    }
}

impl LineSymbolizer {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            stroke,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSymbolizer {
    pub fill: Color,
    pub opacity: f64,
    pub comp_op: CompositeMode,
    pub clip: bool,
    pub simplify_tolerance: f64,
    pub simplify_algorithm: SimplifyAlgorithm,
    pub smooth: f64,
    pub transform: TransformList,
}

impl Default for PolygonSymbolizer {
    fn default() -> Self {
        Self {
            fill: Color::rgb(128, 128, 128),
            opacity: 1.0,
            comp_op: CompositeMode::default(),
            clip: true,
            simplify_tolerance: 0.0,
            simplify_algorithm: SimplifyAlgorithm::default(),
            smooth: 0.0,
            transform: TransformList::default(),
        }
    }
}

impl PolygonSymbolizer {
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }
}

/// Per-glyph formatting. Shared between every glyph laid out from the same run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharFormat {
    /// Face to draw with; `None` uses the renderer's default face
    pub face_name: Option<String>,
    pub text_size: f64,
    pub fill: Color,
    pub halo_fill: Color,
    pub halo_radius: f64,
    /// Applies to both fill and halo
    pub text_opacity: f64,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self {
            face_name: None,
            text_size: 10.0,
            fill: Color::BLACK,
            halo_fill: Color::WHITE,
            halo_radius: 0.0,
            text_opacity: 1.0,
        }
    }
}

/// Where labels are anchored relative to their geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPlacement {
    #[default]
    Point,
    Line,
    Interior,
}

/// Label style. Everything except `comp_op` and `format` is read by the
/// layout engine, not by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSymbolizer {
    /// Attribute holding the label text
    pub name: String,
    pub format: Arc<CharFormat>,
    pub comp_op: CompositeMode,
    pub placement: LabelPlacement,
    /// Padding around the label box when testing for collisions
    pub min_distance: f64,
    pub allow_overlap: bool,
    /// Drop labels that would cross the edge of the surface
    pub avoid_edges: bool,
    pub displacement: Vec2,
}

impl Default for TextSymbolizer {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            format: Arc::new(CharFormat::default()),
            comp_op: CompositeMode::default(),
            placement: LabelPlacement::default(),
            min_distance: 0.0,
            allow_overlap: false,
            avoid_edges: false,
            displacement: Vec2::ZERO,
        }
    }
}

impl TextSymbolizer {
    pub fn new(name: impl Into<String>, format: CharFormat) -> Self {
        Self {
            name: name.into(),
            format: Arc::new(format),
            ..Default::default()
        }
    }
}
