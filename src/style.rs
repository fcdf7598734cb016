//! Resolved style values.
//!
//! These are handed to the renderer by the upstream style processor. They are
//! immutable for the duration of a render pass.

mod color;
mod composite;
mod stroke;
mod symbolizer;
mod transform;

pub use color::Color;
pub use composite::CompositeMode;
pub use stroke::{LineCap, LineJoin, Stroke};
pub use symbolizer::{
    CharFormat, LabelPlacement, LineSymbolizer, PolygonSymbolizer, SimplifyAlgorithm, Symbolizer,
    TextSymbolizer,
};
pub use transform::{Expr, TransformList, TransformNode};
