//! Backend-agnostic map rendering.
//!
//! Styled features go through a vertex conversion pipeline into backend
//! paths, style attributes are translated into paint state, and labels are
//! drawn glyph by glyph from placements supplied by an external layout
//! engine. Drawing itself is left to a [`render::Surface`].

pub mod config;
pub mod errors;
pub mod feature;
pub mod logging;
pub mod map;
pub mod paint;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod style;
pub mod text;

pub use config::RendererConfig;
pub use errors::RenderError;
pub use feature::{Feature, Geometry, GeometryKind};
pub use map::{Layer, Map, Style};
pub use render::{render_map, MapRenderer, Surface, SurfaceSize};
