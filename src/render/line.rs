use anyhow::Result;

use crate::feature::Feature;
use crate::paint;
use crate::pipeline::{GeometryClass, PipelineOptions, VertexConverter};
use crate::projection::Projection;
use crate::render::{MapRenderer, Surface};
use crate::style::LineSymbolizer;

impl<S: Surface> MapRenderer<'_, S> {
    /// Strokes every path of the feature as one draw.
    pub(crate) fn process_line(
        &mut self,
        sym: &LineSymbolizer,
        feature: &Feature,
        projection: &dyn Projection,
    ) -> Result<()> {
        let affine = sym.transform.evaluate(feature, self.config.scale_factor);
        let converter = VertexConverter::new(
            GeometryClass::Line,
            PipelineOptions::from(sym),
            self.converter_context(projection, affine),
        );

        let mut path = S::Path::default();
        let mut drawn = false;
        for geom in feature.paths() {
            drawn |= converter.apply(geom, &mut path);
        }
        if !drawn {
            return Ok(());
        }

        let paint = paint::stroke_paint(
            &sym.stroke,
            sym.comp_op,
            self.config.scale_factor,
            self.config.anti_alias,
        );
        self.surface.stroke_path(&path, &paint)
    }
}
