//! Surface that records draw calls instead of rasterizing them.

use anyhow::Result;
use hashbrown::HashSet;
use kurbo::BezPath;

use crate::errors::RenderError;
use crate::paint::Paint;
use crate::render::{Surface, SurfaceSize};
use crate::style::Color;

/// One primitive call into a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillPath { path: BezPath, paint: Paint },
    StrokePath { path: BezPath, paint: Paint },
    Glyph { glyph: char, face: Option<String>, paint: Paint },
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Rotate { degrees: f64 },
}

impl DrawCommand {
    /// True for commands that put pixels on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::Clear(_)
                | DrawCommand::FillPath { .. }
                | DrawCommand::StrokePath { .. }
                | DrawCommand::Glyph { .. }
        )
    }
}

/// Records every call in order. Knows a fixed set of face names.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    faces: HashSet<String>,
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            faces: HashSet::new(),
            commands: Vec::new(),
            depth: 0,
        }
    }

    pub fn with_faces<I, N>(mut self, faces: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.faces.extend(faces.into_iter().map(Into::into));
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands that put pixels on the surface, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| cmd.is_draw())
    }

    /// Number of unmatched saves.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Surface for RecordingSurface {
    type Path = BezPath;
    type Face = String;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) -> Result<()> {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &Paint) -> Result<()> {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn draw_glyph(&mut self, glyph: char, face: Option<&String>, paint: &Paint) -> Result<()> {
        self.commands.push(DrawCommand::Glyph {
            glyph,
            face: face.cloned(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(RenderError::UnbalancedRestore.into());
        }
        self.depth -= 1;
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, degrees: f64) {
        self.commands.push(DrawCommand::Rotate { degrees });
    }

    fn load_face(&mut self, name: &str) -> Option<String> {
        self.faces.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_without_save_fails() {
        let mut surface = RecordingSurface::new(10, 10);
        let err = surface.restore().unwrap_err();
        assert!(matches!(err.downcast_ref::<RenderError>(), Some(RenderError::UnbalancedRestore)));
        surface.save().unwrap();
        surface.restore().unwrap();
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn only_known_faces_load() {
        let mut surface = RecordingSurface::new(10, 10).with_faces(["DejaVu Sans"]);
        assert_eq!(surface.load_face("DejaVu Sans").as_deref(), Some("DejaVu Sans"));
        assert!(surface.load_face("Comic Sans").is_none());
    }

    #[test]
    fn draws_skip_state_changes() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.save().unwrap();
        surface.translate(1.0, 2.0);
        surface.clear(Color::WHITE).unwrap();
        surface.restore().unwrap();
        assert_eq!(surface.commands().len(), 4);
        assert_eq!(surface.draws().count(), 1);

        let taken = surface.take_commands();
        assert_eq!(taken[0], DrawCommand::Save);
        assert!(surface.commands().is_empty());
    }
}
