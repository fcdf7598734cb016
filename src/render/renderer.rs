use anyhow::Result;
use kurbo::{Affine, Rect};
use log::{debug, trace};

use crate::config::RendererConfig;
use crate::errors::RenderError;
use crate::feature::Feature;
use crate::map::{Layer, Map, Style};
use crate::pipeline::ConverterContext;
use crate::projection::{Projection, ViewTransform};
use crate::render::Surface;
use crate::style::Symbolizer;
use crate::text::{CollisionDetector, FaceCache, LayoutEngine};

/// Renders styled features onto a borrowed [`Surface`].
///
/// The layout engine and collision detector are borrowed for the duration
/// of a map pass; the detector is shared with the layout engine, which
/// registers every placement it accepts.
pub struct MapRenderer<'a, S: Surface> {
    pub(crate) surface: &'a mut S,
    pub(crate) layout: &'a mut dyn LayoutEngine,
    pub(crate) detector: &'a mut dyn CollisionDetector,
    pub(crate) config: RendererConfig,
    pub(crate) view: ViewTransform,
    /// Query extent of the current layer, in layer coordinates
    pub(crate) query_extent: Rect,
    pub(crate) faces: FaceCache<S::Face>,
}

impl<'a, S: Surface> MapRenderer<'a, S> {
    pub fn new(
        surface: &'a mut S,
        layout: &'a mut dyn LayoutEngine,
        detector: &'a mut dyn CollisionDetector,
        config: RendererConfig,
    ) -> Result<Self> {
        config.validate()?;

        let size = surface.size();
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: size.width,
                height: size.height,
            }
            .into());
        }

        let extent = Rect::new(0.0, 0.0, size.width as f64, size.height as f64);
        Ok(Self {
            surface,
            layout,
            detector,
            config,
            view: ViewTransform::new(size.width, size.height, extent),
            query_extent: extent,
            faces: FaceCache::new(),
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn scale_factor(&self) -> f64 {
        self.config.scale_factor
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn query_extent(&self) -> Rect {
        self.query_extent
    }

    pub fn surface(&self) -> &S {
        self.surface
    }

    /// Label buffer in pixels: the larger of the map's and the renderer's.
    pub fn buffer_size(&self, map: &Map) -> f64 {
        map.buffer_size.max(self.config.buffer_size)
    }

    /// Sets up the view for `map` and fills the background if the map has one.
    pub fn start_map(&mut self, map: &Map) -> Result<()> {
        map.validate()?;
        debug!(
            "start map processing: {}x{} extent {:?}",
            map.width, map.height, map.extent
        );

        let size = self.surface.size();
        if size.width != map.width || size.height != map.height {
            debug!(
                "surface is {}x{}, map is {}x{}",
                size.width, size.height, map.width, map.height
            );
        }

        self.view = ViewTransform::new(map.width, map.height, map.extent);
        self.query_extent = map.extent;

        if let Some(background) = map.background {
            self.surface.clear(background)?;
        }
        Ok(())
    }

    pub fn end_map(&mut self, _map: &Map) {
        debug!("end map processing");
    }

    /// Records the extent subsequent geometry is clipped against.
    pub fn start_layer(&mut self, layer: &Layer, query_extent: Rect) {
        debug!(
            "start layer processing: {} query extent {:?}",
            layer.name, query_extent
        );
        self.query_extent = query_extent;
    }

    pub fn end_layer(&mut self, layer: &Layer) {
        debug!("end layer processing: {}", layer.name);
    }

    pub fn start_style(&mut self, style: &Style) {
        debug!("start style processing: {}", style.name);
    }

    pub fn end_style(&mut self, style: &Style) {
        debug!("end style processing: {}", style.name);
    }

    /// Draws `feature` with `sym`. Only surface failures are reported;
    /// degenerate geometry is skipped.
    pub fn process(
        &mut self,
        sym: &Symbolizer,
        feature: &Feature,
        projection: &dyn Projection,
    ) -> Result<()> {
        trace!("processing {} symbolizer for feature {}", sym.kind(), feature.id);
        match sym {
            Symbolizer::Line(sym) => self.process_line(sym, feature, projection),
            Symbolizer::Polygon(sym) => self.process_polygon(sym, feature, projection),
            Symbolizer::Text(sym) => self.process_text(sym, feature, projection),
        }
    }

    pub(crate) fn converter_context<'c>(
        &'c self,
        projection: &'c dyn Projection,
        affine: Affine,
    ) -> ConverterContext<'c> {
        ConverterContext {
            clip_extent: self.query_extent,
            projection,
            view: &self.view,
            affine,
            scale_factor: self.config.scale_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::{DrawCommand, RecordingSurface};
    use crate::style::Color;
    use crate::text::{LabelCollisionDetector, LabelRequest, Placement, PlacementFinder};

    struct NoLabels;

    struct Exhausted;

    impl PlacementFinder for Exhausted {
        fn next(&mut self) -> bool {
            false
        }

        fn placements(&self) -> &[Placement] {
            &[]
        }
    }

    impl LayoutEngine for NoLabels {
        fn placement_finder<'r>(
            &'r mut self,
            _request: LabelRequest<'r>,
            _detector: &'r mut dyn CollisionDetector,
        ) -> Box<dyn PlacementFinder + 'r> {
            Box::new(Exhausted)
        }
    }

    #[test]
    fn rejects_invalid_scale_factor() {
        let mut surface = RecordingSurface::new(10, 10);
        let mut layout = NoLabels;
        let mut detector = LabelCollisionDetector::for_map(10, 10, 0.0);
        let config = RendererConfig::default().with_scale_factor(0.0);
        let err = match MapRenderer::new(&mut surface, &mut layout, &mut detector, config) {
            Ok(_) => panic!("zero scale factor accepted"),
            Err(err) => err,
        };
        assert!(matches!(
            err.downcast_ref::<RenderError>(),
            Some(RenderError::InvalidScaleFactor(_))
        ));
    }

    #[test]
    fn hooks_track_view_and_extent() {
        let mut surface = RecordingSurface::new(20, 10);
        let mut layout = NoLabels;
        let mut detector = LabelCollisionDetector::for_map(20, 10, 0.0);
        let config = RendererConfig::default();
        let mut renderer =
            MapRenderer::new(&mut surface, &mut layout, &mut detector, config).unwrap();

        let map = Map::new(20, 10, Rect::new(0.0, 0.0, 200.0, 100.0));
        renderer.start_map(&map).unwrap();
        assert_eq!(renderer.view().resolution(), 10.0);
        assert_eq!(renderer.query_extent(), map.extent);

        let layer = Layer::new("roads");
        let query = Rect::new(-10.0, -10.0, 210.0, 110.0);
        renderer.start_layer(&layer, query);
        assert_eq!(renderer.query_extent(), query);
        renderer.end_layer(&layer);
        renderer.end_map(&map);

        // no background configured
        assert!(renderer.surface().commands().is_empty());
    }

    #[test]
    fn background_clears_the_surface() {
        let mut surface = RecordingSurface::new(10, 10);
        let mut layout = NoLabels;
        let mut detector = LabelCollisionDetector::for_map(10, 10, 0.0);
        let config = RendererConfig::default();
        let mut renderer =
            MapRenderer::new(&mut surface, &mut layout, &mut detector, config).unwrap();

        let map = Map::new(10, 10, Rect::new(0.0, 0.0, 1.0, 1.0)).with_background(Color::WHITE);
        renderer.start_map(&map).unwrap();
        assert_eq!(renderer.surface().commands(), &[DrawCommand::Clear(Color::WHITE)]);
    }

    #[test]
    fn buffer_size_takes_the_larger_setting() {
        let mut surface = RecordingSurface::new(10, 10);
        let mut layout = NoLabels;
        let mut detector = LabelCollisionDetector::for_map(10, 10, 0.0);
        let config = RendererConfig {
            buffer_size: 8.0,
            ..Default::default()
        };
        let renderer = MapRenderer::new(&mut surface, &mut layout, &mut detector, config).unwrap();

        let map = Map::new(10, 10, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(renderer.buffer_size(&map), 8.0);
        assert_eq!(renderer.buffer_size(&map.with_buffer_size(32.0)), 32.0);
    }
}
