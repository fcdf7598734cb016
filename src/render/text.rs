use anyhow::Result;
use kurbo::Point;

use crate::feature::Feature;
use crate::paint::{self, Paint};
use crate::projection::Projection;
use crate::render::{MapRenderer, Surface};
use crate::style::{CompositeMode, TextSymbolizer};
use crate::text::{FaceCache, GlyphNode, LabelRequest, Placement};

impl<S: Surface> MapRenderer<'_, S> {
    /// Draws every placement the layout engine accepts for the feature.
    pub(crate) fn process_text(
        &mut self,
        sym: &TextSymbolizer,
        feature: &Feature,
        projection: &dyn Projection,
    ) -> Result<()> {
        let request = LabelRequest {
            symbolizer: sym,
            feature,
            projection,
            view: &self.view,
            query_extent: self.query_extent,
            scale_factor: self.config.scale_factor,
        };
        let mut finder = self.layout.placement_finder(request, &mut *self.detector);

        let mut glyphs = GlyphRenderer {
            surface: &mut *self.surface,
            faces: &mut self.faces,
            default_face: &self.config.default_face,
            comp_op: sym.comp_op,
            scale_factor: self.config.scale_factor,
            anti_alias: self.config.anti_alias,
        };

        while finder.next() {
            for placement in finder.placements() {
                glyphs.draw_placement(placement)?;
            }
        }
        Ok(())
    }
}

struct GlyphRenderer<'g, S: Surface> {
    surface: &'g mut S,
    faces: &'g mut FaceCache<S::Face>,
    default_face: &'g str,
    comp_op: CompositeMode,
    scale_factor: f64,
    anti_alias: bool,
}

impl<S: Surface> GlyphRenderer<'_, S> {
    /// Halos for every glyph first, then fills, so no halo covers a
    /// neighbouring glyph's fill.
    fn draw_placement(&mut self, placement: &Placement) -> Result<()> {
        for node in &placement.nodes {
            if node.format.halo_radius > 0.0 {
                let paint = paint::halo_paint(
                    &node.format,
                    self.comp_op,
                    self.scale_factor,
                    self.anti_alias,
                );
                self.draw_glyph(placement.center, node, &paint)?;
            }
        }

        for node in &placement.nodes {
            let paint =
                paint::glyph_paint(&node.format, self.comp_op, self.scale_factor, self.anti_alias);
            self.draw_glyph(placement.center, node, &paint)?;
        }
        Ok(())
    }

    fn draw_glyph(&mut self, center: Point, node: &GlyphNode, paint: &Paint) -> Result<()> {
        let name = node.format.face_name.as_deref().unwrap_or(self.default_face);
        let surface = &mut *self.surface;
        let face = self.faces.get_or_load(name, |name| surface.load_face(name));

        let origin = node.origin(center);
        self.surface.save()?;
        self.surface.translate(origin.x, origin.y);
        self.surface.rotate(node.rotation_degrees());
        let drawn = self.surface.draw_glyph(node.glyph, face, paint);
        self.surface.restore()?;
        drawn
    }
}
