use anyhow::Result;

use crate::feature::Feature;
use crate::paint;
use crate::pipeline::{GeometryClass, PipelineOptions, VertexConverter};
use crate::projection::Projection;
use crate::render::{MapRenderer, Surface};
use crate::style::PolygonSymbolizer;

impl<S: Surface> MapRenderer<'_, S> {
    pub(crate) fn process_polygon(
        &mut self,
        sym: &PolygonSymbolizer,
        feature: &Feature,
        projection: &dyn Projection,
    ) -> Result<()> {
        let affine = sym.transform.evaluate(feature, self.config.scale_factor);
        let converter = VertexConverter::new(
            GeometryClass::Polygon,
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

        let paint = paint::fill_paint(sym.fill, sym.opacity, sym.comp_op, self.config.anti_alias);
        self.surface.fill_path(&path, &paint)
    }
}
