use anyhow::Result;

use crate::paint::Paint;
use crate::pipeline::PathSink;
use crate::style::Color;

/// Size of a surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Drawing primitives the renderer needs from a 2D backend.
///
/// The ordered sequence of calls into a surface is the renderer's entire
/// output. Calls occur on the thread owning the surface.
pub trait Surface {
    /// Backend path, built by the vertex pipeline.
    type Path: PathSink + Default;
    /// Backend font face handle.
    type Face;

    fn size(&self) -> SurfaceSize;

    /// Fills the whole surface, replacing its content.
    fn clear(&mut self, color: Color) -> Result<()>;

    fn fill_path(&mut self, path: &Self::Path, paint: &Paint) -> Result<()>;

    /// Strokes `path`, applying the paint's dash effect if it has one.
    fn stroke_path(&mut self, path: &Self::Path, paint: &Paint) -> Result<()>;

    /// Draws a single glyph at the current origin. `None` uses the backend's
    /// default face.
    fn draw_glyph(&mut self, glyph: char, face: Option<&Self::Face>, paint: &Paint) -> Result<()>;

    /// Pushes the current transform.
    fn save(&mut self) -> Result<()>;

    /// Pops the transform pushed by the matching [`save`](Self::save).
    fn restore(&mut self) -> Result<()>;

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotates the current transform, clockwise in device space.
    fn rotate(&mut self, degrees: f64);

    /// Looks up a face by name. `None` if the backend does not know it.
    fn load_face(&mut self, name: &str) -> Option<Self::Face>;
}
