//! Map rendering on top of a 2D [`Surface`].
//!
//! [`MapRenderer`] owns the per-pass render state and dispatches each
//! (feature, symbolizer) pair to its handler. [`render_map`] walks a map's
//! layers and styles and drives the renderer's lifecycle hooks.

mod line;
mod polygon;
mod processor;
mod renderer;
mod surface;
mod text;

/// Surface implementations.
pub mod backends {
    /// Cairo raster backend
    #[cfg(feature = "backend_cairo")]
    pub mod cairo;
    pub mod recording;
    /// Skia raster backend
    #[cfg(feature = "backend_skia")]
    pub mod skia;
}

pub use processor::{layer_query_extent, render_map};
pub use renderer::MapRenderer;
pub use surface::{Surface, SurfaceSize};
